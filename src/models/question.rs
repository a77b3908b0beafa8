use std::fmt;
use std::ops::Index;
use std::slice;
use std::sync::Arc;

/// One of the four answer slots of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [Self::A, Self::B, Self::C, Self::D];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }

    /// Parses a single letter label, ignoring case and surrounding whitespace.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "A" | "a" => Some(Self::A),
            "B" | "b" => Some(Self::B),
            "C" | "c" => Some(Self::C),
            "D" | "d" => Some(Self::D),
            _ => None,
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A validated multiple-choice question. All fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: String,
}

impl Question {
    pub fn option(&self, label: OptionLabel) -> &str {
        match label {
            OptionLabel::A => &self.option_a,
            OptionLabel::B => &self.option_b,
            OptionLabel::C => &self.option_c,
            OptionLabel::D => &self.option_d,
        }
    }

    pub fn options(&self) -> [(OptionLabel, &str); 4] {
        OptionLabel::ALL.map(|label| (label, self.option(label)))
    }

    /// Resolves `correct_answer` to the label it designates.
    ///
    /// A letter label wins; otherwise the answer is matched against the
    /// option texts. Returns `None` when the question cannot be scored.
    pub fn correct_label(&self) -> Option<OptionLabel> {
        OptionLabel::parse(&self.correct_answer).or_else(|| {
            OptionLabel::ALL
                .into_iter()
                .find(|label| self.option(*label) == self.correct_answer)
        })
    }

    pub fn is_correct(&self, label: OptionLabel) -> bool {
        self.correct_label() == Some(label)
    }
}

/// Ordered, immutable list of questions for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck(Arc<[Question]>);

impl Deck {
    pub fn new(questions: Vec<Question>) -> Self {
        Self(questions.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.0.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Question> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Question] {
        &self.0
    }
}

impl Index<usize> for Deck {
    type Output = Question;

    fn index(&self, index: usize) -> &Question {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Question;
    type IntoIter = slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<Question>> for Deck {
    fn from(questions: Vec<Question>) -> Self {
        Self::new(questions)
    }
}
