//! Fixed heuristic tables. Process-wide constants, never mutated.

pub const DEFAULT_TITLE: &str = "Untitled Project";
pub const DEFAULT_TAGLINE: &str = "A project worth a closer look.";
pub const TAGLINE_MAX: usize = 160;
/// Paragraphs shorter than this are treated as the one-line pitch.
pub const TAGLINE_SHORT: usize = 200;

pub const CTA_KEYWORDS: &[&str] = &[
    "demo", "live", "try", "website", "playground", "app", "deploy",
];
pub const INSTALL_KEYWORDS: &[&str] = &[
    "install", "quick-start", "quickstart", "getting-started", "get-started", "setup",
];
pub const GET_STARTED_LABEL: &str = "Get Started";
pub const SOURCE_LABEL: &str = "View on GitHub";

pub const CODE_HOSTS: &[&str] = &[
    "github.com", "gitlab.com", "bitbucket.org", "codeberg.org", "sr.ht",
];
pub const SOCIAL_HOSTS: &[&str] = &[
    "twitter.com", "x.com", "discord.gg", "discord.com", "linkedin.com", "youtube.com",
    "reddit.com", "t.me", "bsky.app", "mastodon.social", "facebook.com", "instagram.com",
];
pub const SECONDARY_MAX: usize = 4;
pub const SOCIAL_MAX: usize = 2;

pub const FEATURE_HEADING_KEYWORDS: &[&str] = &[
    "feature", "what's", "why", "highlight", "benefit", "advantage", "capability", "key",
];
/// Siblings inspected after a feature heading when looking for its list.
pub const FEATURE_LOOKAHEAD: usize = 3;
pub const FEATURES_MAX: usize = 6;
pub const BOLD_FALLBACK_MAX: usize = 5;

/// (heading aliases, canonical title). Aliases are compared lower-cased with
/// glyphs and a trailing colon removed.
pub const SECTION_SYNONYMS: &[(&[&str], &str)] = &[
    (
        &["usage", "quickstart", "quick start", "getting started", "get started", "how it works", "how to use"],
        "How it works",
    ),
    (&["installation", "install", "setup", "set up", "installing"], "Install"),
    (&["roadmap", "todo", "to do", "to-do", "future plans"], "Roadmap"),
    (&["features", "key features", "highlights", "why"], "Features"),
    (&["examples", "example", "showcase"], "Examples"),
    (&["demo", "live demo", "screenshots", "screenshot"], "Demo"),
    (&["configuration", "config", "options", "settings"], "Configuration"),
    (&["api", "api reference", "reference"], "API"),
    (&["documentation", "docs"], "Documentation"),
    (&["tech stack", "built with", "technologies", "stack"], "Tech Stack"),
    (&["project structure", "structure", "folder structure", "directory structure"], "Project Structure"),
    (&["contributing", "contribute", "how to contribute", "contributors"], "Contributing"),
    (&["faq", "faqs", "frequently asked questions"], "FAQ"),
    (&["troubleshooting", "known issues"], "Troubleshooting"),
    (&["changelog", "release notes", "history"], "Changelog"),
    (&["acknowledgments", "acknowledgements", "credits", "thanks"], "Acknowledgments"),
    (&["license", "licence"], "License"),
    (&["contact", "connect", "community", "support"], "Connect"),
];

/// Topic precedence for the section orderer.
pub const SECTION_PRIORITY: &[&str] = &[
    "how-it-works",
    "quick-start",
    "installation",
    "getting-started",
    "usage",
    "examples",
    "demo",
    "configuration",
    "api",
    "documentation",
    "tech-stack",
    "project-structure",
    "contributing",
    "roadmap",
    "faq",
    "troubleshooting",
    "changelog",
    "acknowledgments",
    "license",
    "connect",
];

pub const BADGE_ALT_KEYWORDS: &[&str] = &["license", "version", "build", "status", "badge"];
pub const BADGE_LINK_KEYWORDS: &[&str] = &["license", "version", "npm", "badge"];
pub const BADGE_HOSTS: &[&str] = &[
    "shields.io", "badge.fury.io", "badgen.net", "travis-ci.org", "travis-ci.com",
    "circleci.com", "codecov.io", "coveralls.io", "badgen.io",
];
pub const BADGES_MAX: usize = 5;
/// Below this many badges the plain-text badge heuristic kicks in.
pub const BADGES_TEXT_THRESHOLD: usize = 2;
pub const BADGE_TEXT_MAX_CHARS: usize = 100;
pub const BADGE_TEXT_MAX_WORDS: usize = 8;
pub const BADGE_TEXT_TOKENS: &[&str] = &[
    "react", "vue", "svelte", "angular", "typescript", "javascript", "python", "rust", "go",
    "node.js", "nodejs", "docker", "kubernetes", "next.js", "tailwind", "graphql", "postgresql",
    "mongodb", "redis", "aws", "mit", "apache", "java", "kotlin", "swift",
];

pub const HERO_ALT_KEYWORDS: &[&str] = &["screenshot", "demo", "preview", "logo", "hero", "banner"];

pub const STATS_MAX: usize = 4;

pub const TECH_TERMS: &[&str] = &[
    "react", "vue", "svelte", "angular", "next.js", "nuxt", "node.js", "deno", "bun",
    "typescript", "javascript", "python", "rust", "go", "java", "kotlin", "swift", "ruby",
    "php", "c++", "docker", "kubernetes", "postgresql", "mysql", "sqlite", "mongodb", "redis",
    "graphql", "tailwind", "vite", "webpack", "aws", "firebase", "supabase",
];
pub const TECH_MAX: usize = 8;

pub const TESTIMONIAL_MIN_CHARS: usize = 20;
pub const TESTIMONIAL_MAX_CHARS: usize = 300;
pub const TESTIMONIALS_MAX: usize = 3;
