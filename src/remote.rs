//! Remote endpoint URLs and credential redaction
//!
//! The hosted repository is addressed as `https://{host}/{owner}/{repo}`.
//! The push URL carries the token as URL userinfo; once the push succeeds
//! the remote is rewritten to the clean form.

use regex::Regex;
use std::sync::LazyLock;

use crate::secret::Secret;

/// Matches the userinfo part of `scheme://userinfo@host`.
static URL_USERINFO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<scheme>[A-Za-z][A-Za-z0-9+.\-]*://)[^/@\s]+@")
        .expect("userinfo pattern is valid")
});

/// A repository on the hosting service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub host: String,
    pub owner: String,
    pub repo: String,
}

impl RemoteTarget {
    pub fn new(host: impl Into<String>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Push URL with the token embedded as userinfo
    pub fn authenticated_url(&self, token: &Secret) -> String {
        format!(
            "https://{}@{}/{}/{}.git",
            token.expose(),
            self.host,
            self.owner,
            self.repo
        )
    }

    /// Credential-free clone URL
    pub fn clean_url(&self) -> String {
        format!("https://{}/{}/{}.git", self.host, self.owner, self.repo)
    }

    /// Browser URL of the repository
    pub fn web_url(&self) -> String {
        format!("https://{}/{}/{}", self.host, self.owner, self.repo)
    }

    /// Page where a new repository is created
    pub fn new_repository_url(&self) -> String {
        format!("https://{}/new", self.host)
    }
}

/// Page where personal access tokens are issued
pub fn token_settings_url(host: &str) -> String {
    format!("https://{host}/settings/tokens")
}

/// Whether the account identifier is an email address rather than a username
pub fn is_email(account: &str) -> bool {
    account.contains('@')
}

/// Commit author name for an account: the local part of an email, or the
/// account itself.
pub fn author_name(account: &str) -> &str {
    match account.split_once('@') {
        Some((local, _)) if !local.is_empty() => local,
        _ => account,
    }
}

/// Replace the userinfo of every URL in `text` with `***`.
pub fn redact_credentials(text: &str) -> String {
    URL_USERINFO.replace_all(text, "${scheme}***@").into_owned()
}

/// Strip userinfo from a single URL, if it has any.
///
/// Returns `None` when the URL carries no credential.
pub fn strip_credentials(url: &str) -> Option<String> {
    if URL_USERINFO.is_match(url) {
        Some(URL_USERINFO.replace(url, "${scheme}").into_owned())
    } else {
        None
    }
}
