//! Tour guide responses and conversations.

use testresult::TestResult;

use voyage::prelude::*;

#[test]
fn reference_questions() {
    let responder = angola::responder();

    assert_eq!(
        responder.respond("Quero saber sobre gastronomia angolana"),
        angola::GASTRONOMY
    );
    assert_eq!(responder.respond("xyz123 nonsense"), angola::FALLBACK);
    assert_eq!(responder.respond(""), angola::FALLBACK);
}

#[test]
fn first_declared_group_wins_on_overlap() {
    let responder = angola::responder();

    // "prato" (gastronomy) and "viagem" (travel tips) both match
    assert_eq!(
        responder.respond("Que prato provar na viagem?"),
        angola::GASTRONOMY
    );
}

#[test]
fn reordering_groups_changes_the_answer() {
    let mut groups = angola::keyword_groups();
    groups.reverse();
    let responder = Responder::new(groups, angola::FALLBACK);

    assert_eq!(
        responder.respond("Que prato provar na viagem?"),
        angola::TRAVEL_TIPS
    );
}

#[test]
fn conversation_records_questions_and_answers() {
    let guide = angola::guide();
    let mut conversation = Conversation::start(&guide);

    conversation.ask(&guide.responder, "Fale da cultura local");
    conversation.ask(&guide.responder, "   ");

    assert_eq!(
        conversation.exchanges(),
        [
            ChatExchange::guide(angola::GREETING),
            ChatExchange::user("Fale da cultura local"),
            ChatExchange::guide(angola::CULTURE),
        ]
    );
}

#[test]
fn quick_topic_asks_its_prompt() {
    let guide = angola::guide();
    let mut conversation = Conversation::new();

    assert_eq!(
        conversation
            .ask_topic(&guide, "Gastronomia")
            .map(|exchange| exchange.text.as_str()),
        Some(angola::GASTRONOMY)
    );
    assert_eq!(conversation.len(), 2);
}

#[test]
fn configured_topics_replace_the_defaults() -> TestResult {
    let config = Config::from_yaml(
        r#"
guide:
  fallback: "Sem resposta."
  topics:
    - topic: praias
      keywords: [Praia, mar]
      answer: "Visite a Caota."
"#,
    )?;

    assert_eq!(config.guide.responder.respond("Qual a melhor PRAIA?"), "Visite a Caota.");
    assert_eq!(config.guide.responder.respond("comida"), "Sem resposta.");
    assert_eq!(config.guide.greeting, angola::GREETING);

    Ok(())
}
