use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tri-state result of a launch, derived from the API's `success` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Failure,
    Pending,
}

impl Outcome {
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Outcome::Success,
            Some(false) => Outcome::Failure,
            None => Outcome::Pending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::Failure => "Failure",
            Outcome::Pending => "Pending",
        }
    }

    /// CSS colour used by the HTML renderer.
    pub fn color(&self) -> &'static str {
        match self {
            Outcome::Success => "green",
            Outcome::Failure => "red",
            Outcome::Pending => "gray",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patch {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flickr {
    #[serde(default)]
    pub original: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchLinks {
    #[serde(default)]
    pub patch: Option<Patch>,
    #[serde(default)]
    pub webcast: Option<String>,
    #[serde(default)]
    pub wikipedia: Option<String>,
    #[serde(default)]
    pub article: Option<String>,
    #[serde(default)]
    pub flickr: Option<Flickr>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Core {
    #[serde(default)]
    pub reused: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Launch {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date_utc: String,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub links: Option<LaunchLinks>,
    #[serde(default)]
    pub rocket: Option<String>,
    #[serde(default)]
    pub launchpad: Option<String>,
    #[serde(default)]
    pub payloads: Option<Vec<String>>,
    #[serde(default)]
    pub flight_number: Option<u32>,
    #[serde(default)]
    pub upcoming: Option<bool>,
    #[serde(default)]
    pub cores: Option<Vec<Core>>,
}

impl Launch {
    pub fn outcome(&self) -> Outcome {
        Outcome::from_flag(self.success)
    }

    /// Parsed `date_utc`; accepts RFC 3339 or a bare `YYYY-MM-DD`.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.date_utc.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Display date, or "Unknown" when absent or unparseable.
    pub fn formatted_date(&self) -> String {
        match self.timestamp() {
            Some(ts) => ts.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => "Unknown".to_string(),
        }
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unknown Launch"
        } else {
            &self.name
        }
    }

    pub fn details_text(&self) -> Option<&str> {
        self.details.as_deref().filter(|d| !d.is_empty())
    }

    pub fn payload_ids(&self) -> &[String] {
        self.payloads.as_deref().unwrap_or(&[])
    }

    pub fn any_core_reused(&self) -> bool {
        self.cores
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .any(|c| c.reused == Some(true))
    }

    pub fn patch_small(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|l| l.patch.as_ref())
            .and_then(|p| p.small.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn patch_large(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|l| l.patch.as_ref())
            .and_then(|p| p.large.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn webcast(&self) -> Option<&str> {
        self.link(|l| l.webcast.as_deref())
    }

    pub fn wikipedia(&self) -> Option<&str> {
        self.link(|l| l.wikipedia.as_deref())
    }

    pub fn article(&self) -> Option<&str> {
        self.link(|l| l.article.as_deref())
    }

    pub fn flickr_images(&self) -> &[String] {
        self.links
            .as_ref()
            .and_then(|l| l.flickr.as_ref())
            .map(|f| f.original.as_slice())
            .unwrap_or(&[])
    }

    fn link<'a>(&'a self, pick: impl Fn(&'a LaunchLinks) -> Option<&'a str>) -> Option<&'a str> {
        self.links.as_ref().and_then(pick).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rocket {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Launchpad {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payload {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub customers: Vec<String>,
}
