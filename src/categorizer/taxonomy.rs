use std::collections::HashSet;

use regex::Regex;
use thiserror::Error;

/// Category given to conversations nothing else could place
pub const FALLBACK_CATEGORY: &str = "Unprocessed";

/// Catch-all category with no keywords of its own
pub const MISCELLANEOUS_CATEGORY: &str = "Miscellaneous";

#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("Invalid keyword '{keyword}' in category '{category}': {source}")]
    InvalidKeyword {
        category: String,
        keyword: String,
        #[source]
        source: regex::Error,
    },

    #[error("Category '{0}' is listed more than once")]
    DuplicateCategory(String),

    #[error("Category '{0}' is reserved for conversations without a match")]
    ReservedCategory(String),
}

/// A keyword and its compiled case-insensitive whole-word pattern
#[derive(Debug, Clone)]
pub struct Keyword {
    text: String,
    pattern: Regex,
}

impl Keyword {
    fn new(category: &str, text: &str) -> Result<Self, TaxonomyError> {
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(text))).map_err(|source| {
            TaxonomyError::InvalidKeyword {
                category: category.to_string(),
                keyword: text.to_string(),
                source,
            }
        })?;
        Ok(Self { text: text.to_string(), pattern })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Non-overlapping whole-word occurrences in `text`
    pub fn count_in(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }
}

#[derive(Debug, Clone)]
pub struct CategoryRule {
    name: String,
    keywords: Vec<Keyword>,
}

impl CategoryRule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }
}

/// Ordered list of categories and their keyword sets
///
/// Order is significant: when two categories score the same, the one listed
/// first wins. Built once per run and only read afterwards.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    rules: Vec<CategoryRule>,
}

impl Taxonomy {
    /// Builds a taxonomy from `(category, keywords)` pairs in priority order
    ///
    /// Keywords are trimmed; blanks are dropped and case-insensitive duplicates
    /// within a category collapse to the first spelling.
    pub fn new<I, C, K, S>(entries: I) -> Result<Self, TaxonomyError>
    where
        I: IntoIterator<Item = (C, K)>,
        C: AsRef<str>,
        K: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Vec::new();
        let mut seen_categories = HashSet::new();

        for (category, keywords) in entries {
            let category = category.as_ref().trim();
            if category == FALLBACK_CATEGORY {
                return Err(TaxonomyError::ReservedCategory(category.to_string()));
            }
            if !seen_categories.insert(category.to_string()) {
                return Err(TaxonomyError::DuplicateCategory(category.to_string()));
            }

            let mut seen_keywords = HashSet::new();
            let mut compiled = Vec::new();
            for keyword in keywords {
                let keyword = keyword.as_ref().trim();
                if keyword.is_empty() || !seen_keywords.insert(keyword.to_lowercase()) {
                    continue;
                }
                compiled.push(Keyword::new(category, keyword)?);
            }

            rules.push(CategoryRule { name: category.to_string(), keywords: compiled });
        }

        Ok(Self { rules })
    }

    /// The built-in technical/personal topic taxonomy
    pub fn builtin() -> Result<Self, TaxonomyError> {
        Self::new(BUILTIN_TAXONOMY.iter().map(|(category, keywords)| (*category, keywords.iter())))
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

const BUILTIN_TAXONOMY: &[(&str, &[&str])] = &[
    (
        "DevOps",
        &[
            "devops", "ci/cd", "jenkins", "kubernetes", "docker", "ansible", "terraform",
            "prometheus", "grafana", "gitlab", "circleci", "chef", "puppet",
        ],
    ),
    (
        "System Administration",
        &[
            "mikrotik", "nginx", "ubuntu", "server", "zimbra", "linux", "windows server",
            "active directory", "dns", "dhcp", "apache", "ftp", "firewall", "ssl",
            "let's encrypt",
        ],
    ),
    (
        "Development/Programming",
        &[
            "python", "bash", "powershell", "git", "script", "javascript", "js", "html", "css",
            "c#", "java", "ruby", "php", "go", "rust", "typescript", "node.js", "django", "flask",
        ],
    ),
    (
        "Web Development",
        &[
            "html", "css", "javascript", "js", "react", "angular", "vue", "node.js", "express",
            "wordpress", "drupal", "joomla", "sass", "bootstrap", "tailwind", "npm", "webpack",
        ],
    ),
    (
        "Database Management",
        &[
            "sql", "mysql", "postgresql", "mongodb", "database", "oracle", "sql server", "nosql",
            "redis", "cassandra", "sqlite", "dbms", "schema", "replication", "sharding",
        ],
    ),
    (
        "Networking",
        &[
            "tcp", "udp", "vpn", "firewall", "routing", "switching", "cisco", "network", "ip",
            "subnet", "dhcp", "lan", "wan", "bgp", "ospf", "icmp", "nat",
        ],
    ),
    (
        "Cloud Computing",
        &[
            "aws", "azure", "gcp", "cloud", "ec2", "s3", "lambda", "cloudformation", "cloudwatch",
            "docker", "kubernetes", "serverless", "rds", "load balancer", "autoscaling", "iam",
            "terraform",
        ],
    ),
    (
        "Security",
        &[
            "rsa", "aes", "sha", "encryption", "cybersecurity", "ssl", "tls", "firewall",
            "vulnerability", "penetration testing", "hacking", "malware", "ransomware",
            "phishing", "ddos", "brute force", "zero-day", "backdoor", "keylogger", "siem", "ids",
            "ips", "soc", "threat hunting",
        ],
    ),
    (
        "Artificial Intelligence",
        &[
            "ai", "machine learning", "deep learning", "neural network", "tensorflow", "pytorch",
            "nlp", "computer vision", "reinforcement learning", "supervised learning",
            "unsupervised learning", "gpt", "transformer", "classification", "regression",
            "clustering", "cnn", "rnn",
        ],
    ),
    (
        "Data Science",
        &[
            "data science", "data analysis", "pandas", "numpy", "matplotlib", "statistics",
            "data visualization", "regression", "classification", "clustering", "big data",
            "hadoop", "spark", "etl", "data pipeline", "data wrangling", "jupyter", "sql", "excel",
        ],
    ),
    (
        "Project Management",
        &[
            "agile", "scrum", "kanban", "project management", "jira", "confluence", "trello",
            "waterfall", "pmp", "scope", "risk management", "stakeholder", "milestones",
            "deliverables",
        ],
    ),
    (
        "Personal Development",
        &[
            "productivity", "time management", "self-improvement", "career", "motivation",
            "leadership", "communication", "teamwork", "emotional intelligence",
            "problem solving", "decision making",
        ],
    ),
    (
        "Health and Wellness",
        &[
            "health", "fitness", "nutrition", "mental health", "wellness", "exercise", "diet",
            "vitamin", "therapy", "meditation", "yoga", "supplements", "hydration",
            "stress management",
        ],
    ),
    (
        "Travel",
        &[
            "visa", "travel", "passport", "immigration", "flight", "hotel", "tourism", "itinerary",
            "booking", "customs", "airport", "baggage", "trip", "insurance",
            "reagrupación familiar", "permiso de trabajo", "obtención ciudadanía",
        ],
    ),
    (
        "Language Learning",
        &[
            "english", "spanish", "russian", "language", "learning", "grammar", "vocabulary",
            "ielts", "toefl", "esl", "speaking", "listening", "writing", "reading",
        ],
    ),
    (
        "Hardware",
        &[
            "raspberry pi", "arduino", "hardware", "cpu", "gpu", "motherboard", "ssd", "hdd",
            "ram", "power supply", "peripherals", "usb", "bios", "overclocking", "cooling",
            "raspbian", "firmware", "pixel 8 pro", "móviles",
        ],
    ),
    (
        "E-Commerce",
        &[
            "promo code", "discount", "free shipping", "return policy", "coupon", "checkout",
            "gift card", "deal", "sale",
        ],
    ),
    (
        "Support and Troubleshooting",
        &[
            "help desk", "it support", "troubleshoot", "ticketing", "incident management",
            "escalation", "remote support", "system logs", "error logs", "patching", "backup",
            "restore", "diagnostics", "sla", "downtime", "uptime", "root cause analysis",
            "touch screen confirmation",
        ],
    ),
    (
        "Finance and Investment",
        &[
            "dividends", "capped amount", "investment return", "passive income", "ganar €20,000",
            "€", "$", "£", "¥",
        ],
    ),
    (
        "Entertainment",
        &[
            "series de fantasía", "películas", "libros de fantasía", "videojuegos", "música",
            "arte digital", "streaming", "comics", "novelas gráficas",
        ],
    ),
    (
        "Legal and Documentation",
        &[
            "legal document", "contract", "agreement", "terms and conditions", "privacy policy",
            "license", "certification", "visa application", "residence permit", "tax id",
            "work permit", "official document", "notarized document", "birth certificate",
        ],
    ),
    (MISCELLANEOUS_CATEGORY, &[]),
];
