use crate::emojicss::types::EmojiRecord;

/// Turn an emoji-test description into the slug used in CDN filenames.
pub fn normalize_description(description: &str) -> String {
    description
        .replace(": ", "_")
        .replace(',', "")
        .replace(' ', "-")
}

pub fn normalize_legacy_name(name: &str) -> String {
    name.replace(' ', "-")
}

/// Builds the candidate image URLs for one record, in fallback order.
pub struct UrlCandidates<'a> {
    base_url: &'a str,
    record: &'a EmojiRecord,
    description: String,
    code: String,
}

impl<'a> UrlCandidates<'a> {
    pub fn new(base_url: &'a str, record: &'a EmojiRecord) -> Self {
        Self {
            base_url,
            record,
            description: normalize_description(&record.description),
            code: record.joined_code(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    fn url(&self, stem: &str) -> String {
        format!("{}/{}.png", self.base_url, stem).to_lowercase()
    }

    /// `{description}_{codes}.png`
    pub fn primary(&self) -> String {
        self.url(&format!("{}_{}", self.description, self.code))
    }

    /// `{legacy-name}_{codes}.png`; `legacy_name` must already be normalised.
    pub fn legacy(&self, legacy_name: &str) -> String {
        self.url(&format!("{}_{}", legacy_name, self.code))
    }

    /// `{description}_{codes}_{last code}.png`
    pub fn doubled_last_code(&self) -> String {
        self.url(&format!(
            "{}_{}_{}",
            self.description,
            self.code,
            self.record.last_code()
        ))
    }

    /// `{description with '_' as '-'}_{codes}.png`
    pub fn dashed(&self) -> String {
        self.url(&format!("{}_{}", self.description.replace('_', "-"), self.code))
    }
}
