// Lead rows as read from the CSV file, and the payload sent to Lemlist.

use serde::{Deserialize, Serialize};

/// A raw CSV row. Every column is optional here: an absent column and an
/// empty cell are both treated as missing by [`LeadRecord::validate`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadRecord {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub campaign_id: Option<String>,
    pub custom_opening_line: Option<String>,
}

/// Names of the required columns that were missing or empty in a row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required fields ({})", .0.join(", "))]
pub struct MissingFields(pub Vec<&'static str>);

/// A row that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub campaign_id: String,
    pub custom_opening_line: String,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl LeadRecord {
    /// Checks the four required fields (email, firstName, campaignId,
    /// customOpeningLine) and reports all missing ones at once.
    pub fn validate(self) -> Result<Lead, MissingFields> {
        let email = present(self.email);
        let first_name = present(self.first_name);
        let campaign_id = present(self.campaign_id);
        let custom_opening_line = present(self.custom_opening_line);

        match (email, first_name, campaign_id, custom_opening_line) {
            (Some(email), Some(first_name), Some(campaign_id), Some(custom_opening_line)) => {
                Ok(Lead {
                    email,
                    first_name,
                    last_name: present(self.last_name),
                    company_name: present(self.company_name),
                    campaign_id,
                    custom_opening_line,
                })
            }
            (email, first_name, campaign_id, custom_opening_line) => {
                let missing = [
                    ("email", email.is_none()),
                    ("firstName", first_name.is_none()),
                    ("campaignId", campaign_id.is_none()),
                    ("customOpeningLine", custom_opening_line.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();
                Err(MissingFields(missing))
            }
        }
    }
}

/// Body of `POST /campaigns/{campaignId}/leads`. Optional fields are sent as
/// `null` rather than omitted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLeadRequest<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: Option<&'a str>,
    pub company_name: Option<&'a str>,
    pub custom_variables: CustomVariables<'a>,
}

/// Custom variables must already exist in the campaign settings, with the
/// exact same names.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomVariables<'a> {
    pub custom_opening_line: &'a str,
}

impl Lead {
    pub fn to_request(&self) -> AddLeadRequest<'_> {
        AddLeadRequest {
            email: &self.email,
            first_name: &self.first_name,
            last_name: self.last_name.as_deref(),
            company_name: self.company_name.as_deref(),
            custom_variables: CustomVariables {
                custom_opening_line: &self.custom_opening_line,
            },
        }
    }
}
