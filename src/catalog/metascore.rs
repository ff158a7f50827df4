use std::ops::RangeInclusive;

/// Named metascore range used by the `metascore` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetascoreBucket {
    pub key: &'static str,
    pub label: &'static str,
    range: (u32, u32),
}

pub const METASCORE_BUCKETS: &[MetascoreBucket] = &[
    MetascoreBucket {
        key: "0",
        label: "Generally unfavorable",
        range: (0, 39),
    },
    MetascoreBucket {
        key: "1",
        label: "Mixed or average",
        range: (40, 59),
    },
    MetascoreBucket {
        key: "2",
        label: "Generally favorable",
        range: (60, 79),
    },
    MetascoreBucket {
        key: "3",
        label: "Universal acclaim",
        range: (80, 100),
    },
];

impl MetascoreBucket {
    pub fn from_key(key: &str) -> Option<&'static MetascoreBucket> {
        METASCORE_BUCKETS.iter().find(|b| b.key == key)
    }

    /// The bucket a score falls in, if any.
    pub fn for_score(score: u32) -> Option<&'static MetascoreBucket> {
        METASCORE_BUCKETS.iter().find(|b| b.contains(score))
    }

    pub fn range(&self) -> RangeInclusive<u32> {
        self.range.0..=self.range.1
    }

    pub fn contains(&self, score: u32) -> bool {
        self.range().contains(&score)
    }
}
