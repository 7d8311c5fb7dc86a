use crate::CONFY_APP_NAME;

use serde::{Deserialize, Serialize};

/// Cross-session state. The only thing the tool remembers is which scene
/// object was previewed last; everything else is rebuilt on launch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewSettings {
    pub last_target: Option<String>,
}

impl PreviewSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "preview").unwrap_or_default()
    }

    pub fn save(&self) {
        let _ = confy::store(CONFY_APP_NAME, "preview", self);
    }
}
