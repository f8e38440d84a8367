//! Angola guide content
//!
//! Default keyword table, greeting and quick topics of the VOYAGEANGOLA tour guide.

use super::{Guide, KeywordGroup, QuickTopic, Responder};

/// First message of a conversation.
pub const GREETING: &str = "👋 Bem-vindo! Este chat está conectado ao ZEUS, o novo guia virtual de Angola 🌍. ⚡ Ainda não está totalmente disponível, mas você já pode conversar comigo e explorar Angola de forma única.\n\nSou como aquele amigo que conhece Angola de cabo a rabo - das praias paradisíacas às montanhas da Huíla, da deliciosa culinária aos ritmos que fazem o coração vibrar. O que você gostaria de descobrir sobre este país maravilhoso?";

/// Answer when no topic matches.
pub const FALLBACK: &str = "Ainda não tenho essa informação completa, mas posso te orientar em como buscar. 😊 Recomendo consultar o Ministério do Turismo de Angola ou guias locais credenciados. Que tal me perguntar sobre gastronomia, pontos turísticos, cultura ou dicas de viagem? 🇦🇴";

/// Gastronomy answer.
pub const GASTRONOMY: &str = "A culinária angolana é incrível! 🍽️ Os pratos principais são o **funge** (feito de mandioca), **calulu** (peixe com folhas de abóbora), **mufete** (peixe grelhado com feijão e dendê) e **muamba de galinha**. Recomendo experimentar nos mercados tradicionais como o Roque Santeiro em Luanda!";

/// Attractions answer.
pub const ATTRACTIONS: &str = "Angola tem lugares incríveis! 🏞️ Em **Luanda**, visite a Fortaleza de São Miguel e a Ilha de Luanda. **Benguela** tem praias paradisíacas como Caota. No **Namibe**, o deserto e o Arco são únicos. Na **Huíla**, não perca a Serra da Leba e Tundavala - vistas de tirar o fôlego!";

/// Culture answer.
pub const CULTURE: &str = "A cultura angolana é vibrante! 🎭 Nossa música inclui **semba** (origem da samba brasileira), **kuduro**, **kizomba** e **kazukuta**. A arte tradicional como máscaras Chokwe e esculturas em madeira é reconhecida mundialmente. Visite durante o Carnaval de Luanda ou Festival Nacional de Cultura!";

/// Provinces answer.
pub const PROVINCES: &str = "Angola tem 18 províncias fascinantes! 🗺️ **Luanda** é a capital vibrante, **Benguela** tem as melhores praias costeiras, **Namibe** oferece aventuras no deserto, **Huíla** tem montanhas e Tundavala, e **Cabinda** é nossa joia tropical. Cada uma tem características únicas de cultura, economia e paisagens!";

/// Travel tips answer.
pub const TRAVEL_TIPS: &str = "Para viajar para Angola: ✈️ **Melhor época** é maio-outubro (estação seca). **Documentos** necessários: visto, passaporte válido e certificado de febre amarela. **Transporte**: TAP/TAAG para chegada, carro com motorista local recomendado. Reserve hospedagem antecipadamente e mantenha documentos sempre seguros!";

/// Keyword groups in match order.
pub fn keyword_groups() -> Vec<KeywordGroup> {
    vec![
        KeywordGroup::new(
            "gastronomia",
            ["gastronomia", "comida", "prato", "típica"],
            GASTRONOMY,
        ),
        KeywordGroup::new(
            "pontos turísticos",
            ["turístico", "visitar", "lugar"],
            ATTRACTIONS,
        ),
        KeywordGroup::new("cultura", ["cultura", "tradição", "música"], CULTURE),
        KeywordGroup::new("províncias", ["província", "região"], PROVINCES),
        KeywordGroup::new("dicas de viagem", ["dica", "viagem", "viajar"], TRAVEL_TIPS),
    ]
}

/// Quick topic buttons.
pub fn quick_topics() -> Vec<QuickTopic> {
    vec![
        QuickTopic::new(
            "Pontos Turísticos",
            "Quais são os principais pontos turísticos de Angola que devo visitar?",
        ),
        QuickTopic::new(
            "Gastronomia",
            "Conte-me sobre a gastronomia típica angolana e pratos que devo experimentar.",
        ),
        QuickTopic::new(
            "Cultura & Tradições",
            "Quero conhecer mais sobre a cultura e tradições de Angola.",
        ),
        QuickTopic::new(
            "Províncias",
            "Quais províncias de Angola são mais interessantes para turismo?",
        ),
        QuickTopic::new(
            "Dicas de Viagem",
            "Que dicas práticas você tem para quem vai viajar para Angola?",
        ),
    ]
}

/// The default responder.
pub fn responder() -> Responder {
    Responder::new(keyword_groups(), FALLBACK)
}

/// The default guide.
pub fn guide() -> Guide {
    Guide {
        greeting: GREETING.to_string(),
        responder: responder(),
        quick_topics: quick_topics(),
    }
}
