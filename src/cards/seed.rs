//! Embedded fallback deck.
//!
//! Used whenever the remote card store is unreachable or has nothing for
//! the requested tier. Ten truths and ten dares per tier.

use super::definition::{Card, CardId, CardType, IntensityLevel};

use super::definition::CardType::{Dare, Truth};
use super::definition::IntensityLevel::{Extremo, Leve, Medio, Pesado};

const SEED_CARDS: &[(&str, CardType, IntensityLevel, &str)] = &[
    ("leve-v1", Truth, Leve, "Qual a pior cantada que você já recebeu?"),
    ("leve-v2", Truth, Leve, "Qual seu crush de infância famoso?"),
    ("leve-v3", Truth, Leve, "Qual foi a sua maior vergonha na escola?"),
    ("leve-v4", Truth, Leve, "Qual é a sua mania mais estranha?"),
    ("leve-v5", Truth, Leve, "Qual foi o presente mais inusitado que você já ganhou?"),
    ("leve-v6", Truth, Leve, "Qual é a sua comida guilty pleasure?"),
    ("leve-v7", Truth, Leve, "Qual foi a mentira mais boba que você já contou?"),
    ("leve-v8", Truth, Leve, "Qual é o seu medo mais bobo?"),
    ("leve-v9", Truth, Leve, "Qual foi a sua fase mais constrangedora?"),
    ("leve-v10", Truth, Leve, "Qual é o seu talento secreto?"),
    ("leve-d1", Dare, Leve, "Fale com sotaque de Portugal até sua próxima vez."),
    ("leve-d2", Dare, Leve, "Conte uma piada ruim sem rir."),
    ("leve-d3", Dare, Leve, "Imite um animal até alguém adivinhar qual é."),
    ("leve-d4", Dare, Leve, "Cante o refrão de uma música infantil."),
    ("leve-d5", Dare, Leve, "Faça uma pose de ioga por 30 segundos."),
    ("leve-d6", Dare, Leve, "Fale apenas fazendo pergunta até sua próxima vez."),
    ("leve-d7", Dare, Leve, "Faça um elogio exagerado para cada pessoa aqui."),
    ("leve-d8", Dare, Leve, "Dance como se ninguém estivesse vendo por 15 segundos."),
    ("leve-d9", Dare, Leve, "Fale como um repórter esportivo por 1 minuto."),
    ("leve-d10", Dare, Leve, "Faça caras e bocas até alguém rir."),
    ("medio-v1", Truth, Medio, "Das pessoas aqui, com quem você iria num segundo encontro?"),
    ("medio-v2", Truth, Medio, "Prefere olhar, sorriso ou voz?"),
    ("medio-v3", Truth, Medio, "Qual foi o seu primeiro beijo? Como foi?"),
    ("medio-v4", Truth, Medio, "Você já teve uma paixão não correspondida?"),
    ("medio-v5", Truth, Medio, "Qual é a sua maior insegurança física?"),
    ("medio-v6", Truth, Medio, "Você já ficou com alguém só por carência?"),
    ("medio-v7", Truth, Medio, "Qual foi a situação mais constrangedora em um encontro?"),
    ("medio-v8", Truth, Medio, "Você já teve ciúmes de um amigo?"),
    ("medio-v9", Truth, Medio, "Qual é o seu tipo ideal fisicamente?"),
    ("medio-v10", Truth, Medio, "Você já mentiu sobre sua idade para alguém?"),
    ("medio-d1", Dare, Medio, "Elogie algo específico da pessoa à direita."),
    ("medio-d2", Dare, Medio, "Dance 15s com alguém."),
    ("medio-d3", Dare, Medio, "Sussurre algo fofo no ouvido de alguém."),
    ("medio-d4", Dare, Medio, "Faça uma massagem nos ombros de alguém por 30s."),
    ("medio-d5", Dare, Medio, "Dê um abraço de urso em cada pessoa."),
    ("medio-d6", Dare, Medio, "Conte um segredo bobo seu para o grupo."),
    ("medio-d7", Dare, Medio, "Faça uma declaração de amor platônico para alguém."),
    ("medio-d8", Dare, Medio, "Deixe alguém escolher uma pose para você fazer e postar."),
    ("medio-d9", Dare, Medio, "Cante uma música romântica olhando nos olhos de alguém."),
    ("medio-d10", Dare, Medio, "Fale sobre o que mais te atrai na pessoa à esquerda."),
    ("pesado-v1", Truth, Pesado, "Uma fantasia que te intriga (sem detalhes)."),
    ("pesado-v2", Truth, Pesado, "Três turn-ons e dois turn-offs."),
    ("pesado-v3", Truth, Pesado, "Qual foi a sua experiência mais ousada?"),
    ("pesado-v4", Truth, Pesado, "Você já teve interesse romântico em alguém aqui?"),
    ("pesado-v5", Truth, Pesado, "Qual parte do corpo você mais repara em alguém?"),
    ("pesado-v6", Truth, Pesado, "Você prefere ser dominante ou submisso?"),
    ("pesado-v7", Truth, Pesado, "Qual foi o lugar mais inusitado que você já beijou alguém?"),
    ("pesado-v8", Truth, Pesado, "Você já teve sonhos eróticos com alguém que conhece?"),
    ("pesado-v9", Truth, Pesado, "Qual é a sua zona erógena mais sensível?"),
    ("pesado-v10", Truth, Pesado, "Você já fez algo que seus pais nunca podem descobrir?"),
    ("pesado-d1", Dare, Pesado, "Lap dance 20–30s se ambos toparem."),
    ("pesado-d2", Dare, Pesado, "ASMR 15s no ouvido (neutro)."),
    ("pesado-d3", Dare, Pesado, "Beije o pescoço de alguém por 5 segundos."),
    ("pesado-d4", Dare, Pesado, "Faça uma massagem sensual nas mãos de alguém."),
    ("pesado-d5", Dare, Pesado, "Sussurre algo sedutor no ouvido de alguém."),
    ("pesado-d6", Dare, Pesado, "Dance de forma sensual por 20 segundos."),
    ("pesado-d7", Dare, Pesado, "Dê uma mordidinha de leve no lóbulo da orelha de alguém."),
    ("pesado-d8", Dare, Pesado, "Faça carinho no cabelo de alguém por 30 segundos."),
    ("pesado-d9", Dare, Pesado, "Olhe fixamente nos olhos de alguém por 20 segundos."),
    ("pesado-d10", Dare, Pesado, "Sussurre o que você faria se fossem só vocês dois."),
    ("extremo-v1", Truth, Extremo, "Uma fantasia que só faria com a pessoa certa."),
    ("extremo-v2", Truth, Extremo, "3 limites inegociáveis."),
    ("extremo-v3", Truth, Extremo, "Qual é o seu fetiche mais secreto?"),
    ("extremo-v4", Truth, Extremo, "Você já teve atração por alguém proibido?"),
    ("extremo-v5", Truth, Extremo, "Qual foi a sua experiência mais intensa?"),
    ("extremo-v6", Truth, Extremo, "Você toparia um ménage? Com quem?"),
    ("extremo-v7", Truth, Extremo, "Qual é o seu maior desejo sexual não realizado?"),
    ("extremo-v8", Truth, Extremo, "Você já traiu ou foi traído? Como foi?"),
    ("extremo-v9", Truth, Extremo, "O que te deixa mais excitado mentalmente?"),
    ("extremo-v10", Truth, Extremo, "Se pudesse realizar uma fantasia hoje, qual seria?"),
    ("extremo-d1", Dare, Extremo, "Role-play 30s sem falas explícitas."),
    ("extremo-d2", Dare, Extremo, "Dance lentamente testa com testa 20s."),
    ("extremo-d3", Dare, Extremo, "Faça uma massagem corporal sensual por 1 minuto."),
    ("extremo-d4", Dare, Extremo, "Beije apaixonadamente por 10 segundos."),
    ("extremo-d5", Dare, Extremo, "Sussurre uma fantasia no ouvido de alguém."),
    ("extremo-d6", Dare, Extremo, "Faça um strip-tease sensual por 30 segundos."),
    ("extremo-d7", Dare, Extremo, "Simule uma cena romântica de filme por 1 minuto."),
    ("extremo-d8", Dare, Extremo, "Faça carinho íntimo (respeitando limites) por 20s."),
    ("extremo-d9", Dare, Extremo, "Deite junto e sussurre desejos por 30 segundos."),
    ("extremo-d10", Dare, Extremo, "Escolha uma posição íntima e fiquem assim por 15s."),
];

/// The whole embedded deck.
#[must_use]
pub fn seed_deck() -> Vec<Card> {
    SEED_CARDS
        .iter()
        .map(|&(id, card_type, level, text)| Card::new(CardId::new(id), card_type, text, level))
        .collect()
}

/// The embedded cards of one tier.
#[must_use]
pub fn seed_deck_for(level: IntensityLevel) -> Vec<Card> {
    seed_deck().into_iter().filter(|c| c.level == level).collect()
}
