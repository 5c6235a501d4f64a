use regex::Regex;
use std::sync::LazyLock;

static VERSE_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\d+\]").unwrap());

/// How a raw user-supplied reference is fetched and expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `"John 3:16"`: one verse, stored under the provider's echoed reference.
    Single,
    /// `"Romans 8:1-3"`: verses numbered from `start`, at most `span` of them
    /// when the end verse could be read.
    VerseRange {
        book_and_chapter: String,
        start: u32,
        span: Option<usize>,
    },
    /// `"Psalm 23"`: the whole chapter, verses numbered from 1.
    Chapter { book_and_chapter: String },
    /// A hyphenated reference whose start verse is not a number, or whose end
    /// names another chapter.
    Unparseable,
}

impl ReferenceKind {
    pub fn is_range(&self) -> bool {
        !matches!(self, ReferenceKind::Single)
    }
}

/// Classifies a trimmed raw reference.
///
/// Anything with a hyphen, or without a colon, is a range. Book names are
/// opaque: nothing here checks them against a canon.
pub fn classify(raw: &str) -> ReferenceKind {
    let raw = raw.trim();

    let Some((book_and_chapter, verses)) = raw.split_once(':') else {
        return ReferenceKind::Chapter {
            book_and_chapter: raw.to_string(),
        };
    };

    let Some((start, end)) = verses.split_once('-') else {
        if raw.contains('-') {
            // Hyphen before the colon, e.g. "1-2 Kings 3:4".
            return ReferenceKind::Unparseable;
        }
        return ReferenceKind::Single;
    };

    let Ok(start) = start.trim().parse::<u32>() else {
        return ReferenceKind::Unparseable;
    };

    // "Romans 8:38-9:2" crosses a chapter; its verses cannot be numbered from `start`.
    if end.contains(':') {
        return ReferenceKind::Unparseable;
    }

    // An end before the start is not rejected; it simply imposes no cap.
    let span = end
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(|end| end.checked_sub(start))
        .map(|delta| delta as usize + 1);

    ReferenceKind::VerseRange {
        book_and_chapter: book_and_chapter.trim().to_string(),
        start,
        span,
    }
}

/// Splits provider text fetched with verse numbers into one string per verse.
///
/// Only the bracketed `[n]` markers are recognized; text in any other format
/// comes back as a single segment.
pub fn split_verses(passage: &str) -> Vec<String> {
    VERSE_MARKER
        .split(passage)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Concrete references for `count` split segments of a range reference.
///
/// The segment count decides how many references are produced, capped by the
/// declared span: a provider returning fewer verses than the range implies
/// yields fewer references, all anchored at the start verse.
pub fn expand_references(kind: &ReferenceKind, count: usize) -> Vec<String> {
    match kind {
        ReferenceKind::VerseRange {
            book_and_chapter,
            start,
            span,
        } => {
            let count = span.map_or(count, |span| count.min(span));
            (0..count)
                .map(|offset| format!("{}:{}", book_and_chapter, *start as usize + offset))
                .collect()
        }
        ReferenceKind::Chapter { book_and_chapter } => (1..=count)
            .map(|verse| format!("{}:{}", book_and_chapter, verse))
            .collect(),
        ReferenceKind::Single | ReferenceKind::Unparseable => Vec::new(),
    }
}
