use std::path::PathBuf;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct SpreadsheetConfig {
    pub spreadsheet_id: Box<str>,
    /// A1 range read in one call, e.g. `Feuille 1!1:15`.
    pub range: Box<str>,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthConfig {
    /// OAuth installed-app flow. The first run opens a consent page and the
    /// resulting tokens are cached in `token_path`.
    Installed {
        #[serde(default = "default_credentials_path")]
        credentials_path: PathBuf,
        #[serde(default = "default_token_path")]
        token_path: PathBuf,
    },
    ServiceAccount {
        priv_key: PathBuf,
    },
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig::Installed {
            credentials_path: default_credentials_path(),
            token_path: default_token_path(),
        }
    }
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("credentials.json")
}

fn default_token_path() -> PathBuf {
    PathBuf::from("token.json")
}
