use std::collections::{BTreeMap, HashMap};

use groupmgr_auth::ManagerConfig;

use super::{ConfigError, Directive, Settings};

/// Read access to page text by page id.
pub trait PageSource {
    fn page_text(&self, page_id: &str) -> Option<String>;
}

impl PageSource for HashMap<String, String> {
    fn page_text(&self, page_id: &str) -> Option<String> {
        self.get(page_id).cloned()
    }
}

impl PageSource for BTreeMap<String, String> {
    fn page_text(&self, page_id: &str) -> Option<String> {
        self.get(page_id).cloned()
    }
}

/// Id of the configuration page for `page_id`.
///
/// Pages already inside the namespace are their own configuration page.
pub fn config_page_id(conf_namespace: &str, page_id: &str) -> String {
    if page_id.starts_with(conf_namespace) {
        return page_id.to_string();
    }
    let mut id = conf_namespace.to_string();
    if !id.ends_with(':') {
        id.push(':');
    }
    id.push_str(page_id);
    id
}

/// Picks the directive for a page and turns it into a [`ManagerConfig`].
#[derive(Debug, Clone)]
pub struct ConfigResolver<'a> {
    settings: &'a Settings,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Resolve the configuration for the manager embedded in `page_id`.
    ///
    /// Inline arguments are used unless the settings require the
    /// configuration page; a placeholder always defers to that page.
    pub fn resolve<P>(
        &self,
        inline: Option<&Directive>,
        page_id: &str,
        pages: &P,
    ) -> Result<ManagerConfig, ConfigError>
    where
        P: PageSource + ?Sized,
    {
        let inline = inline
            .filter(|_| !self.settings.require_conf_namespace)
            .filter(|d| matches!(d, Directive::Inline { .. }));

        if let Some(directive) = inline {
            return self.settings.manager_config(directive);
        }

        let conf_page = config_page_id(&self.settings.conf_namespace, page_id);
        let text = pages.page_text(&conf_page).ok_or_else(|| {
            tracing::debug!(page = %conf_page, "configuration page not found");
            ConfigError::PageNotFound(conf_page.clone())
        })?;

        let directive = Directive::find_in(&text)?;
        self.settings.manager_config(&directive)
    }
}
