use crate::models::{Deck, Question};

/// (question, A, B, C, D, correct label)
const FALLBACK_QUESTIONS: [(&str, &str, &str, &str, &str, &str); 8] = [
    (
        "What is the capital of France?",
        "Berlin",
        "Madrid",
        "Paris",
        "Rome",
        "C",
    ),
    (
        "Which planet is known as the Red Planet?",
        "Venus",
        "Mars",
        "Jupiter",
        "Mercury",
        "B",
    ),
    (
        "What is the largest ocean on Earth?",
        "Atlantic Ocean",
        "Indian Ocean",
        "Arctic Ocean",
        "Pacific Ocean",
        "D",
    ),
    (
        "How many continents are there?",
        "Seven",
        "Five",
        "Six",
        "Eight",
        "A",
    ),
    (
        "What is the chemical symbol for gold?",
        "Ag",
        "Au",
        "Gd",
        "Go",
        "B",
    ),
    (
        "Who painted the Mona Lisa?",
        "Vincent van Gogh",
        "Pablo Picasso",
        "Leonardo da Vinci",
        "Claude Monet",
        "C",
    ),
    (
        "What is the boiling point of water at sea level in Celsius?",
        "100",
        "90",
        "80",
        "120",
        "A",
    ),
    (
        "Which gas do plants absorb from the atmosphere?",
        "Oxygen",
        "Nitrogen",
        "Hydrogen",
        "Carbon dioxide",
        "D",
    ),
];

/// The bundled deck used whenever no valid external questions are available.
pub fn fallback_deck() -> Deck {
    FALLBACK_QUESTIONS
        .iter()
        .map(|(question, a, b, c, d, correct)| Question {
            question: question.to_string(),
            option_a: a.to_string(),
            option_b: b.to_string(),
            option_c: c.to_string(),
            option_d: d.to_string(),
            correct_answer: correct.to_string(),
        })
        .collect::<Vec<_>>()
        .into()
}
