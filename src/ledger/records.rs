//! Supply-chain record types, one per role dashboard.
//!
//! Field names serialize in camelCase to match the portal's JSON contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supply-chain actor role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Farmer,
    Collector,
    Distributor,
    Manufacturer,
}

impl Role {
    /// Path segment of the role's dashboard
    pub fn slug(&self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Collector => "collector",
            Role::Distributor => "distributor",
            Role::Manufacturer => "manufacturer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Farmer => "Farmer",
            Role::Collector => "Collector",
            Role::Distributor => "Distributor",
            Role::Manufacturer => "Manufacturer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mock on-chain proof attached to every record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainProof {
    pub signature_hash: String,
    pub transaction_hash: String,
    /// Display label, e.g. "15,234,567"
    pub block_number: String,
    pub timestamp: DateTime<Utc>,
}

// ── Farmer ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FarmerProfile {
    pub name: String,
    pub email: String,
    pub image: String,
    pub experience: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CropDetails {
    pub name: String,
    pub variant: String,
    pub quantity: String,
    pub condition: String,
    pub harvest_date: String,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub temperature: String,
    pub humidity: String,
    pub rainfall: String,
    pub season: String,
    pub soil_moisture: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FarmLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub farm_size: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FarmerRecord {
    pub profile: FarmerProfile,
    pub crop: CropDetails,
    pub weather: WeatherSnapshot,
    pub location: FarmLocation,
    pub blockchain: BlockchainProof,
}

// ── Shared company profile / facility ────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    pub email: String,
    pub image: String,
    pub phone: String,
    pub license: String,
    pub established: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gmp_certified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_certified: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FacilityLocation {
    pub facility: String,
    pub address: String,
    pub coordinates: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_capacity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse_size: Option<String>,
}

// ── Collector ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDetails {
    pub batch_id: String,
    pub herb_name: String,
    pub quantity_collected: String,
    pub quality_grade: String,
    pub collection_date: String,
    pub storage_condition: String,
    pub moisture_content: String,
    pub purity_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectorLogistics {
    pub vehicle_number: String,
    pub driver_name: String,
    pub route_optimized: bool,
    pub estimated_delivery: String,
    pub tracking_id: String,
    pub temperature_monitored: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectorRecord {
    pub profile: CompanyProfile,
    pub collection: CollectionDetails,
    pub logistics: CollectorLogistics,
    pub location: FacilityLocation,
    pub blockchain: BlockchainProof,
}

// ── Distributor ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DistributionDetails {
    pub batch_id: String,
    pub herb_name: String,
    pub quantity_received: String,
    pub quantity_processed: String,
    pub packaging_type: String,
    pub distribution_date: String,
    pub expiry_date: String,
    pub quality_check: String,
    pub barcode_generated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DistributorLogistics {
    pub warehouse_location: String,
    pub vehicle_fleet: String,
    pub delivery_radius: String,
    pub average_delivery_time: String,
    pub temperature_controlled: bool,
    pub gps_tracking: bool,
    pub last_mile_partners: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub monthly_volume: String,
    pub on_time_delivery: String,
    pub customer_satisfaction: String,
    pub return_rate: String,
    pub network_coverage: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DistributorRecord {
    pub profile: CompanyProfile,
    pub distribution: DistributionDetails,
    pub logistics: DistributorLogistics,
    pub performance: PerformanceMetrics,
    pub location: FacilityLocation,
    pub blockchain: BlockchainProof,
}

// ── Manufacturer ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinalProduct {
    pub name: String,
    pub quantity: String,
    pub packaging: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturingDetails {
    pub batch_id: String,
    pub herb_name: String,
    pub quantity_received: String,
    pub final_products: Vec<FinalProduct>,
    pub manufacturing_date: String,
    pub expiry_date: String,
    pub quality_tests: Vec<String>,
    pub batch_certificate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestResults {
    pub purity: String,
    pub potency: String,
    pub heavy_metals: String,
    pub microbial: String,
    pub pesticides: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QualityControl {
    pub lab_tested: bool,
    pub testing_lab: String,
    pub test_results: TestResults,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturingFacility {
    pub name: String,
    pub address: String,
    pub coordinates: String,
    pub capacity: String,
    pub clean_room_grade: String,
    pub employees: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerRecord {
    pub profile: CompanyProfile,
    pub manufacturing: ManufacturingDetails,
    pub quality_control: QualityControl,
    pub facility: ManufacturingFacility,
    pub blockchain: BlockchainProof,
}

// ── Batch trail ──────────────────────────────────────────────────────────────

/// One hand-off in a batch's journey, pointing at the actor's record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StageRef {
    pub role: Role,
    pub actor_id: String,
    pub action: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchTrail {
    pub batch_id: String,
    pub herb_name: String,
    pub stages: Vec<StageRef>,
}
