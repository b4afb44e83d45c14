use serde::{Deserialize, Serialize};
use time::format_description::well_known::Iso8601;

/// Two-stage sign-off state carried by every application, once per reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn label(self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "PENDING",
            ApprovalStatus::Approved => "APPROVED",
            ApprovalStatus::Rejected => "REJECTED",
        }
    }
}

/// Severity classification of a disapproved traveler. Drives the penalty
/// amount and the warning-letter wording on the server side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Tier {
    One,
    Two,
    Three,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::One, Tier::Two, Tier::Three];

    pub fn label(self) -> &'static str {
        match self {
            Tier::One => "Tier 1",
            Tier::Two => "Tier 2",
            Tier::Three => "Tier 3",
        }
    }

    /// Fixed penalty schedule for checkpoint violations.
    pub fn penalty_rupees(self) -> u32 {
        match self {
            Tier::One => 5_000,
            Tier::Two => 10_000,
            Tier::Three => 20_000,
        }
    }
}

impl TryFrom<i64> for Tier {
    type Error = anyhow::Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Tier::One),
            2 => Ok(Tier::Two),
            3 => Ok(Tier::Three),
            _ => Err(anyhow::anyhow!("Invalid tier value: {}", value)),
        }
    }
}

impl From<Tier> for i64 {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::One => 1,
            Tier::Two => 2,
            Tier::Three => 3,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A travel-clearance application as served by the backend. The client
/// never owns these; each poll cycle replaces the cached copies wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: String,
    pub name: String,
    pub aadhar: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub medium_of_travel: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub doctor_approval: ApprovalStatus,
    pub official_approval: ApprovalStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub doctor_id: Option<String>,
}

impl ApplicationRecord {
    pub fn route(&self) -> String {
        format!(
            "{} -> {}",
            self.source.as_deref().unwrap_or("?"),
            self.destination.as_deref().unwrap_or("?")
        )
    }

    pub fn clearance_ready(&self) -> bool {
        self.doctor_approval == ApprovalStatus::Approved
            && self.official_approval == ApprovalStatus::Approved
    }

    pub fn summary_card(&self) -> CardBody {
        CardBody {
            title: self.name.clone(),
            fields: vec![
                CardField::new("Aadhar", self.aadhar.clone()),
                CardField::new("Route", self.route()),
                CardField::new(
                    "Travel",
                    self.medium_of_travel.clone().unwrap_or_default(),
                ),
            ],
            badges: vec![
                Badge::approval("Doctor", self.doctor_approval),
                Badge::approval("Official", self.official_approval),
            ],
        }
    }

    /// Extra fields shown only while the card is expanded.
    pub fn detail_fields(&self) -> Vec<CardField> {
        let mut fields = vec![CardField::new(
            "Email",
            self.email.clone().unwrap_or_default(),
        )];
        if let Some(created) = &self.created_at {
            fields.push(CardField::new("Applied", display_timestamp(created)));
        }
        if let Some(doctor_id) = &self.doctor_id {
            fields.push(CardField::new("Reviewed by", doctor_id.clone()));
        }
        fields
    }
}

/// A rejected applicant tracked by the health administration. Created on
/// the server when a doctor rejects with health data attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisapprovedTraveler {
    pub id: String,
    pub name: String,
    pub aadhar: String,
    pub tier: Tier,
    #[serde(default)]
    pub disease_name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub current_address: Option<String>,
    #[serde(default)]
    pub expected_recovery_date: Option<String>,
    #[serde(default)]
    pub doctor_id: Option<String>,
    #[serde(default)]
    pub qr_generated: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl DisapprovedTraveler {
    pub fn summary_card(&self) -> CardBody {
        let qr_badge = if self.qr_generated {
            Badge {
                text: "QR Generated".into(),
                tone: Tone::Success,
            }
        } else {
            Badge {
                text: "QR Pending".into(),
                tone: Tone::Pending,
            }
        };
        CardBody {
            title: self.name.clone(),
            fields: vec![
                CardField::new("Aadhar", self.aadhar.clone()),
                CardField::new(
                    "Disease",
                    self.disease_name.clone().unwrap_or_else(|| "N/A".into()),
                ),
            ],
            badges: vec![Badge::tier(self.tier), qr_badge],
        }
    }

    pub fn detail_fields(&self) -> Vec<CardField> {
        let opt = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".into());
        vec![
            CardField::new("Name", self.name.clone()),
            CardField::new(
                "Age",
                self.age
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "N/A".into()),
            ),
            CardField::new("Aadhar", self.aadhar.clone()),
            CardField::new("Email", opt(&self.email)),
            CardField::new("Phone", opt(&self.phone_number)),
            CardField::new("Address", opt(&self.current_address)),
            CardField::new("Disease", opt(&self.disease_name)),
            CardField::new("Tier", self.tier.label().to_string()),
            CardField::new("Expected recovery", opt(&self.expected_recovery_date)),
            CardField::new("Doctor", opt(&self.doctor_id)),
            CardField::new(
                "Recorded",
                self.created_at
                    .as_deref()
                    .map(display_timestamp)
                    .unwrap_or_else(|| "N/A".into()),
            ),
        ]
    }
}

/// Health details a doctor records while rejecting an application.
/// Built client-side, sent once, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthForm {
    pub name: String,
    pub age: u32,
    pub current_address: String,
    pub email: String,
    pub phone_number: String,
    pub disease_name: String,
    pub tier: Tier,
    pub expected_recovery_date: String,
}

/// Colour flag attached to a checkpoint scan result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TravelFlag {
    Red,
    Green,
    Yellow,
}

/// Outcome of scanning a traveler's QR payload at a checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub flag: TravelFlag,
    pub message: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub aadhar: Option<String>,
    #[serde(default)]
    pub tier: Option<Tier>,
    #[serde(default)]
    pub disease_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
}

/// New application submitted by a migrant, alongside a medical report file.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationForm {
    pub name: String,
    pub aadhar: String,
    pub source: String,
    pub destination: String,
    pub medium_of_travel: String,
    pub email: String,
}

/// Aadhar numbers are exactly twelve ASCII digits. Anything else is
/// rejected before a request is made.
pub fn aadhar_valid(aadhar: &str) -> bool {
    aadhar.len() == 12 && aadhar.bytes().all(|b| b.is_ascii_digit())
}

/// Best-effort local rendering of a backend ISO-8601 timestamp. Falls back
/// to the raw string when the server sends something unparseable.
pub fn display_timestamp(raw: &str) -> String {
    match time::PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT) {
        Ok(dt) => format!(
            "{:04}-{:02}-{:02} {:02}:{:02}",
            dt.year(),
            u8::from(dt.month()),
            dt.day(),
            dt.hour(),
            dt.minute()
        ),
        Err(_) => raw.to_string(),
    }
}

/// Pure description of a rendered card. Screens map these to widgets
/// without further formatting, so identical records render identically.
#[derive(Debug, Clone, PartialEq)]
pub struct CardBody {
    pub title: String,
    pub fields: Vec<CardField>,
    pub badges: Vec<Badge>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardField {
    pub label: &'static str,
    pub value: String,
}

impl CardField {
    pub fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub text: String,
    pub tone: Tone,
}

impl Badge {
    fn approval(prefix: &str, status: ApprovalStatus) -> Self {
        let tone = match status {
            ApprovalStatus::Pending => Tone::Pending,
            ApprovalStatus::Approved => Tone::Success,
            ApprovalStatus::Rejected => Tone::Danger,
        };
        Badge {
            text: format!("{}: {}", prefix, status.label()),
            tone,
        }
    }

    fn tier(tier: Tier) -> Self {
        let tone = match tier {
            Tier::One => Tone::Warning,
            Tier::Two | Tier::Three => Tone::Danger,
        };
        Badge {
            text: tier.label().to_string(),
            tone,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Pending,
    Success,
    Warning,
    Danger,
}
