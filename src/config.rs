use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// How chat windows are laid out.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Windows dock side by side along the bottom edge; trimming applies.
    #[default]
    Overlayed,
    /// One chat fills the content area; trimming is moot.
    Fullscreen,
}

/// A roster contact the user can open a chat with
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub groupchat: bool,
}

/// A chat that was open when the app last shut down
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SavedChat {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub groupchat: bool,
    /// Minimized windows come back minimized, seeded into the tray.
    #[serde(default)]
    pub minimized: bool,
}

#[derive(Serialize, Deserialize)]
pub struct Settings {
    pub theme: String,
    #[serde(default)]
    pub view_mode: ViewMode,
    /// Disables auto-minimizing when the overlay row overflows.
    #[serde(default)]
    pub no_trimming: bool,
    #[serde(default)]
    pub tray_collapsed: bool,
    pub display_name: String,
    #[serde(default = "default_contacts")]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub open_chats: Vec<SavedChat>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            view_mode: ViewMode::default(),
            no_trimming: false,
            tray_collapsed: false,
            display_name: "me".to_string(),
            contacts: default_contacts(),
            open_chats: Vec::new(),
        }
    }
}

fn default_contacts() -> Vec<Contact> {
    vec![
        Contact {
            id: "ada".to_string(),
            name: "Ada".to_string(),
            groupchat: false,
        },
        Contact {
            id: "lin".to_string(),
            name: "Lin".to_string(),
            groupchat: false,
        },
        Contact {
            id: "mara".to_string(),
            name: "Mara".to_string(),
            groupchat: false,
        },
        Contact {
            id: "workshop".to_string(),
            name: "Workshop".to_string(),
            groupchat: true,
        },
    ]
}

pub fn settings_path() -> Option<PathBuf> {
    if let Some(proj) = ProjectDirs::from("com", "chatdock", "chatdock") {
        let dir = proj.config_dir();
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Failed to create config dir: {}", e);
            return None;
        }
        return Some(dir.join("settings.json"));
    }
    None
}

pub fn load_settings() -> Option<Settings> {
    let path = settings_path()?;
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn save_settings(settings: &Settings) -> std::io::Result<()> {
    if let Some(path) = settings_path() {
        let mut file = fs::File::create(path)?;
        let data = serde_json::to_string_pretty(settings).unwrap();
        file.write_all(data.as_bytes())?;
    }
    Ok(())
}
