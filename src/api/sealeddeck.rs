use serde::Deserialize;

/// Pool payload from sealeddeck.tech
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SealedDeck {
    pub pool_id: String,
    pub deck: Vec<SealedDeckEntry>,
    pub sideboard: Vec<SealedDeckEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SealedDeckEntry {
    pub name: String,
    pub count: u32,
}

/// Pool lookup by identifier
pub fn pool_url(base_url: &str, pool_id: &str) -> String {
    format!("{}/pools/{}", base_url, pool_id)
}

/// The pool identifier is the final path segment of a shared pool link
pub fn pool_id_from_link(link: &str) -> &str {
    let link = link.trim().trim_end_matches('/');
    match link.rfind('/') {
        Some(idx) => &link[idx + 1..],
        None => link,
    }
}
