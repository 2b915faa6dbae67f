// Campaign creation: one create-campaign request per name, in order.

use crate::api::{ApiClient, ApiError, CreateCampaignRequest};
use crate::console;

/// Created when no names are given on the command line.
pub const DEFAULT_CAMPAIGN_NAMES: [&str; 3] = [
    "FR - jMON - Persona A - C-Suite & Executive",
    "FR - jMON - Persona B - Security Leadership",
    "FR - jMON - Persona C - DevOps & Engineering",
];

#[derive(Debug)]
pub enum CampaignOutcome {
    Created { name: String, id: Option<String> },
    Failed { name: String, error: ApiError },
}

impl CampaignOutcome {
    pub fn name(&self) -> &str {
        match self {
            CampaignOutcome::Created { name, .. } | CampaignOutcome::Failed { name, .. } => name,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, CampaignOutcome::Created { .. })
    }
}

/// Creates every campaign in `names`, printing each outcome. A failure never
/// stops the loop and nothing is retried; creating a name twice is allowed.
pub fn create_campaigns<S: AsRef<str>>(client: &ApiClient, names: &[S]) -> Vec<CampaignOutcome> {
    names
        .iter()
        .map(|name| create_one(client, name.as_ref()))
        .collect()
}

fn create_one(client: &ApiClient, name: &str) -> CampaignOutcome {
    println!("Creating campaign: '{}'...", name);

    let spinner = console::spinner("Waiting for Lemlist...");
    let result = client.create_campaign(&CreateCampaignRequest { name });
    spinner.finish_and_clear();

    match result {
        Ok(created) => {
            let id = created.id;
            log::info!("Created campaign '{}' ({:?})", name, id);
            console::success(format!(
                "Campaign created with ID: {}",
                id.as_deref().unwrap_or("unknown")
            ));
            println!();
            CampaignOutcome::Created {
                name: name.to_owned(),
                id,
            }
        }
        Err(error) => {
            log::warn!("Failed to create campaign '{}': {}", name, error);
            console::failure(format!("Failed to create campaign '{}'", name));
            console::api_error(&error);
            println!();
            CampaignOutcome::Failed {
                name: name.to_owned(),
                error,
            }
        }
    }
}
