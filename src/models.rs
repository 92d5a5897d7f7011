use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub group_id: Option<i64>,
    #[serde(default)]
    pub group: Option<Group>,
}

impl Event {
    /// Owning group id, falling back to the embedded group when the backend
    /// only sends the denormalized reference.
    pub fn group_id(&self) -> Option<i64> {
        self.group_id.or_else(|| self.group.as_ref().map(|group| group.id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewGroup {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEvent {
    pub title: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GroupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EventForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, rename = "groupId")]
    pub group_id: String,
}

impl From<&UserForm> for NewUser {
    fn from(form: &UserForm) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
        }
    }
}

impl From<&GroupForm> for NewGroup {
    fn from(form: &GroupForm) -> Self {
        Self {
            name: form.name.clone(),
            description: form.description.clone(),
        }
    }
}

impl From<&EventForm> for NewEvent {
    fn from(form: &EventForm) -> Self {
        Self {
            title: form.title.clone(),
            date: form.date.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Users,
    Groups,
    Events,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Users, Tab::Groups, Tab::Events];

    /// Lists fetched when the tab is activated, in fetch order. The events
    /// tab also needs groups for its selection control.
    pub fn resources(self) -> &'static [Tab] {
        match self {
            Tab::Users => &[Tab::Users],
            Tab::Groups => &[Tab::Groups],
            Tab::Events => &[Tab::Events, Tab::Groups],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Users => "users",
            Tab::Groups => "groups",
            Tab::Events => "events",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "users" => Ok(Tab::Users),
            "groups" => Ok(Tab::Groups),
            "events" => Ok(Tab::Events),
            other => Err(format!("unknown tab '{other}'")),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TabQuery {
    pub tab: Option<String>,
}
