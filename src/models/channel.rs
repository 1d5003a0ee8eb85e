use serde::{Deserialize, Serialize};

/// One monitored sensor feed with its own backing file and remote path.
/// Channels are fixed by configuration, never created at runtime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub device_id: String,
    #[serde(default = "default_component")]
    pub component: String,
    pub capability: String,
    pub attribute: String,
    /// File name of the backing series, relative to the data directory
    pub file: String,
}

fn default_component() -> String {
    String::from("main")
}

impl Channel {
    /// Dotted location of the reading inside the device status payload.
    pub fn attribute_path(&self) -> String {
        format!(
            "components.{}.{}.{}",
            self.component, self.capability, self.attribute
        )
    }
}
