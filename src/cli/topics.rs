use std::io;

use voyage::{config::Config, report::write_topics};

pub(crate) fn run(config: &Config) -> Result<(), String> {
    write_topics(io::stdout().lock(), &config.guide).map_err(|error| error.to_string())
}
