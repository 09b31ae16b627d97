//! App records returned by the platform API and their display projections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::display::{DisplayMap, DisplayValue};
use crate::domain::format::{capitalize, format_bytes, format_date, quantify};

/// Stack whose process counts are managed through `ps:scale` only.
pub const CEDAR_STACK: &str = "cedar";

/// Create status reported once provisioning has finished.
pub const CREATE_COMPLETE: &str = "complete";

/// Create status reported while provisioning is still running.
pub const CREATE_CREATING: &str = "creating";

/// One entry of the app listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSummary {
    pub name: String,
    #[serde(default)]
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addon {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub email: String,
}

/// Full app record from `GET /apps/{app}`.
///
/// Fields the client does not model are kept in `extra` so raw output can
/// list every key the API returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynos: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_tables: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_finished_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_next_run: Option<String>,
    #[serde(default)]
    pub addons: Vec<Addon>,
    #[serde(default)]
    pub collaborators: Vec<Collaborator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dyno_hours: Option<BTreeMap<String, f64>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AppInfo {
    /// Whether the app runs on the cedar stack.
    #[must_use]
    pub fn is_cedar(&self) -> bool {
        self.stack.as_deref() == Some(CEDAR_STACK)
    }
}

/// Response to an app creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedApp {
    pub name: String,
    #[serde(default)]
    pub create_status: Option<String>,
    #[serde(default)]
    pub stack: Option<String>,
    #[serde(default)]
    pub git_url: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
}

impl CreatedApp {
    /// Whether the platform is still provisioning the app.
    #[must_use]
    pub fn is_creating(&self) -> bool {
        self.create_status.as_deref() == Some(CREATE_CREATING)
    }
}

/// Split the listing into app names owned by `user` and names shared with them.
#[must_use]
pub fn partition_apps(apps: &[AppSummary], user: &str) -> (Vec<String>, Vec<String>) {
    let (owned, shared): (Vec<_>, Vec<_>) = apps.iter().partition(|a| a.owner == user);
    (
        owned.into_iter().map(|a| a.name.clone()).collect(),
        shared.into_iter().map(|a| a.name.clone()).collect(),
    )
}

/// Human-oriented projection of an app record.
///
/// Absent values are dropped; dyno and worker counts only appear for
/// non-cedar stacks, and the owner is never listed as a collaborator.
#[must_use]
pub fn info_display(info: &AppInfo) -> DisplayMap {
    let mut data = DisplayMap::new();
    let mut put = |key: &str, value: Option<String>| {
        if let Some(v) = value {
            data.insert(key.to_string(), DisplayValue::Text(v));
        }
    };

    put(
        "Create Status",
        info.create_status
            .clone()
            .filter(|s| s != CREATE_COMPLETE),
    );
    put("Cron Finished At", info.cron_finished_at.as_deref().map(format_date));
    put("Cron Next Run", info.cron_next_run.as_deref().map(format_date));
    put(
        "Database Size",
        info.database_size.map(|size| match info.database_tables {
            Some(tables) => format!(
                "{} in {}",
                format_bytes(size).replace("(empty)", "0K"),
                quantify("table", tables)
            ),
            None => format_bytes(size),
        }),
    );
    put("Domain Name", info.domain_name.clone());
    put(
        "Dynos",
        info.dynos.filter(|_| !info.is_cedar()).map(|n| n.to_string()),
    );
    put("Git URL", info.git_url.clone());
    put("Owner", info.owner.clone());
    put("Repo Size", info.repo_size.map(format_bytes));
    put("Slug Size", info.slug_size.map(format_bytes));
    put("Stack", info.stack.clone());
    put("Web URL", info.web_url.clone());
    put(
        "Workers",
        info.workers.filter(|_| !info.is_cedar()).map(|n| n.to_string()),
    );

    if !info.addons.is_empty() {
        data.insert(
            "Addons".to_string(),
            DisplayValue::List(info.addons.iter().map(|a| a.description.clone()).collect()),
        );
    }

    let collaborators: Vec<String> = info
        .collaborators
        .iter()
        .map(|c| c.email.clone())
        .filter(|email| Some(email) != info.owner.as_ref())
        .collect();
    if !collaborators.is_empty() {
        data.insert("Collaborators".to_string(), DisplayValue::List(collaborators));
    }

    if let Some(hours) = &info.dyno_hours {
        let rows = hours
            .iter()
            .map(|(kind, h)| (capitalize(kind), format!("{h:.2} dyno-hours")))
            .collect();
        data.insert("Dyno Hours".to_string(), DisplayValue::Map(rows));
    }

    data
}

/// Raw projection of an app record: every attribute as flat text, keyed by
/// the API field name.
///
/// # Errors
///
/// Returns an error if the record cannot be converted to a JSON object.
pub fn info_raw(info: &AppInfo) -> Result<DisplayMap, serde_json::Error> {
    let Value::Object(fields) = serde_json::to_value(info)? else {
        return Ok(DisplayMap::new());
    };

    let mut data = DisplayMap::new();
    for (key, value) in fields {
        let text = match key.as_str() {
            "addons" => sorted_join(info.addons.iter().map(|a| a.name.clone())),
            "collaborators" => sorted_join(info.collaborators.iter().map(|c| c.email.clone())),
            _ => value_text(&value),
        };
        data.insert(key, DisplayValue::Text(text));
    }
    Ok(data)
}

fn sorted_join(items: impl Iterator<Item = String>) -> String {
    let mut items: Vec<String> = items.collect();
    items.sort();
    items.join(",")
}

/// Plain-text form of a JSON scalar; strings are unquoted and null is empty.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
