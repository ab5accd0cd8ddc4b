//! Built-in persona and job lexicons.

/// Keyword lexicons keyed by persona type. A lexicon applies when its key
/// occurs as a substring of the lowercased persona description.
pub(crate) const PERSONA_LEXICONS: &[(&str, &[&str])] = &[
    (
        "researcher",
        &[
            "methodology",
            "approach",
            "method",
            "algorithm",
            "experiment",
            "results",
            "analysis",
            "evaluation",
            "performance",
            "dataset",
            "benchmark",
            "model",
            "framework",
            "technique",
            "implementation",
            "validation",
            "comparison",
        ],
    ),
    (
        "student",
        &[
            "definition",
            "concept",
            "principle",
            "theory",
            "example",
            "formula",
            "equation",
            "problem",
            "solution",
            "exercise",
            "practice",
            "review",
            "summary",
            "key points",
            "important",
            "remember",
            "note",
        ],
    ),
    (
        "analyst",
        &[
            "trend",
            "growth",
            "revenue",
            "profit",
            "loss",
            "market",
            "share",
            "competition",
            "strategy",
            "performance",
            "metrics",
            "kpi",
            "roi",
            "investment",
            "financial",
            "economic",
            "business",
            "analysis",
        ],
    ),
    (
        "journalist",
        &[
            "news",
            "report",
            "investigation",
            "source",
            "evidence",
            "fact",
            "statement",
            "interview",
            "quote",
            "development",
            "event",
            "incident",
            "story",
            "coverage",
            "breaking",
            "update",
            "announcement",
        ],
    ),
];

/// Keyword lexicons keyed by job type. A lexicon applies when any of the
/// underscore-separated words in its key occurs in the lowercased job
/// description.
pub(crate) const JOB_LEXICONS: &[(&str, &[&str])] = &[
    (
        "literature_review",
        &[
            "related work",
            "previous studies",
            "existing research",
            "methodology",
            "findings",
            "contributions",
            "limitations",
            "future work",
            "comparison",
        ],
    ),
    (
        "exam_preparation",
        &[
            "key concepts",
            "important",
            "definition",
            "formula",
            "example",
            "problem",
            "solution",
            "practice",
            "review",
            "summary",
            "theorem",
        ],
    ),
    (
        "financial_analysis",
        &[
            "revenue",
            "profit",
            "loss",
            "growth",
            "trend",
            "performance",
            "investment",
            "market",
            "competition",
            "strategy",
            "forecast",
        ],
    ),
];
