//! Display ordering of a section's lessons and quizzes.

use serde::Serialize;

/// An item positioned within a section by an optional ordering key.
pub trait Ordered {
    fn ordering_key(&self) -> Option<u32>;
}

/// One entry of a section's display list, tagged by origin.
///
/// Serializes as `{"lesson": {...}}` or `{"quiz": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionItem<L, Q> {
    Lesson(L),
    Quiz(Q),
}

/// Interleave lessons and quizzes, each already sorted by ordering key.
///
/// A lesson is emitted first when its key is absent or strictly less than
/// the current quiz's key; otherwise the quiz goes first, so equal keys put
/// the quiz ahead. Only the lesson key is tested for absence, so a quiz
/// without a key yields to whatever lesson it is compared against.
pub fn merge_section_contents<L, Q>(lessons: Vec<L>, quizzes: Vec<Q>) -> Vec<SectionItem<L, Q>>
where
    L: Ordered,
    Q: Ordered,
{
    let mut merged = Vec::with_capacity(lessons.len() + quizzes.len());
    let mut lessons = lessons.into_iter().peekable();
    let mut quizzes = quizzes.into_iter().peekable();

    while let (Some(lesson), Some(quiz)) = (lessons.peek(), quizzes.peek()) {
        let lesson_first = match (lesson.ordering_key(), quiz.ordering_key()) {
            (None, _) => true,
            (Some(l), Some(q)) => l < q,
            (Some(_), None) => true,
        };
        let item = if lesson_first {
            lessons.next().map(SectionItem::Lesson)
        } else {
            quizzes.next().map(SectionItem::Quiz)
        };
        merged.extend(item);
    }
    merged.extend(lessons.map(SectionItem::Lesson));
    merged.extend(quizzes.map(SectionItem::Quiz));
    merged
}
