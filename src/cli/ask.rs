use std::io::{self, Write};

use clap::Args;
use voyage::config::Config;

#[derive(Debug, Args)]
pub(crate) struct AskArgs {
    /// Use a quick topic's canned question instead of typing one
    #[arg(long, conflicts_with = "question")]
    topic: Option<String>,

    /// Question for the guide
    #[arg(required_unless_present = "topic", trailing_var_arg = true)]
    question: Vec<String>,
}

pub(crate) fn run(args: &AskArgs, config: &Config) -> Result<(), String> {
    let guide = &config.guide;

    let question = match &args.topic {
        Some(label) => guide
            .quick_topic(label)
            .map(|topic| topic.prompt.clone())
            .ok_or_else(|| format!("unknown quick topic: {label}"))?,
        None => args.question.join(" "),
    };

    if question.trim().is_empty() {
        return Err("question cannot be empty".to_string());
    }

    let answer = guide.responder.respond(&question);

    writeln!(io::stdout().lock(), "{answer}").map_err(|error| error.to_string())
}
