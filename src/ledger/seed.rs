//! Built-in demo dataset: one Ashwagandha batch and the four actors that handled it.

use chrono::{DateTime, TimeZone, Utc};

use super::records::*;
use super::Ledger;

pub const DEMO_BATCH_ID: &str = "ASH-2024-001";

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn proof(
    signature: &str,
    transaction: &str,
    block: &str,
    timestamp: DateTime<Utc>,
) -> BlockchainProof {
    BlockchainProof {
        signature_hash: signature.into(),
        transaction_hash: transaction.into(),
        block_number: block.into(),
        timestamp,
    }
}

pub(crate) fn farmer() -> FarmerRecord {
    FarmerRecord {
        profile: FarmerProfile {
            name: "Rajesh Kumar".into(),
            email: "rajesh.kumar@ayurvedic-farm.in".into(),
            image: String::new(),
            experience: "10 years".into(),
        },
        crop: CropDetails {
            name: "Ashwagandha".into(),
            variant: "Withania Somnifera".into(),
            quantity: "500 kg".into(),
            condition: "Excellent".into(),
            harvest_date: "2024-01-15".into(),
            certifications: strings(&["Organic", "Ayush Certified"]),
        },
        weather: WeatherSnapshot {
            temperature: "28°C".into(),
            humidity: "65%".into(),
            rainfall: "120mm".into(),
            season: "Post-Monsoon".into(),
            soil_moisture: "Optimal".into(),
        },
        location: FarmLocation {
            latitude: 10.8505,
            longitude: 76.2711,
            address: "Khordha District, Bhubaneswar, India".into(),
            farm_size: "5 acres".into(),
        },
        blockchain: proof(
            "0x1a2b3c4d5e6f7890abcdef1234567890",
            "0xabcdef1234567890abcdef1234567890",
            "15,234,567",
            at(2024, 1, 15, 8, 30),
        ),
    }
}

pub(crate) fn collector() -> CollectorRecord {
    CollectorRecord {
        profile: CompanyProfile {
            name: "Ayurvedic Herbs Co.".into(),
            email: "operations@ayurvedicco.in".into(),
            image: "/collector-company-logo.png".into(),
            phone: "+91 98765 43211".into(),
            license: "AYU-COL-2024-001".into(),
            established: "2018".into(),
            gst_number: None,
            gmp_certified: None,
            iso_certified: None,
        },
        collection: CollectionDetails {
            batch_id: DEMO_BATCH_ID.into(),
            herb_name: "Ashwagandha".into(),
            quantity_collected: "500 kg".into(),
            quality_grade: "Premium A+".into(),
            collection_date: "2024-01-20".into(),
            storage_condition: "Climate Controlled".into(),
            moisture_content: "8.5%".into(),
            purity_level: "99.2%".into(),
        },
        logistics: CollectorLogistics {
            vehicle_number: "KL-07-AB-1234".into(),
            driver_name: "Suresh Nair".into(),
            route_optimized: true,
            estimated_delivery: "2024-01-22".into(),
            tracking_id: "TRK-ASH-20240120-001".into(),
            temperature_monitored: true,
        },
        location: FacilityLocation {
            facility: "Kochi Processing Center".into(),
            address: "Industrial Area, Kochi, Kerala, India".into(),
            coordinates: "9.9312° N, 76.2673° E".into(),
            storage_capacity: Some("10,000 kg".into()),
            warehouse_size: None,
        },
        blockchain: proof(
            "0x2b3c4d5e6f7890abcdef1234567890ab",
            "0xbcdef1234567890abcdef1234567890b",
            "15,234,568",
            at(2024, 1, 20, 14, 15),
        ),
    }
}

pub(crate) fn distributor() -> DistributorRecord {
    DistributorRecord {
        profile: CompanyProfile {
            name: "Herbal Logistics Ltd.".into(),
            email: "operations@herballogistics.com".into(),
            image: "/distributor-company-logo.png".into(),
            phone: "+91 98765 43212".into(),
            license: "AYU-DIST-2024-001".into(),
            established: "2015".into(),
            gst_number: Some("27ABCDE1234F1Z5".into()),
            gmp_certified: None,
            iso_certified: None,
        },
        distribution: DistributionDetails {
            batch_id: DEMO_BATCH_ID.into(),
            herb_name: "Ashwagandha".into(),
            quantity_received: "500 kg".into(),
            quantity_processed: "480 kg".into(),
            packaging_type: "Vacuum Sealed".into(),
            distribution_date: "2024-01-22".into(),
            expiry_date: "2026-01-22".into(),
            quality_check: "Passed".into(),
            barcode_generated: true,
        },
        logistics: DistributorLogistics {
            warehouse_location: "Mumbai Distribution Center".into(),
            vehicle_fleet: "15 vehicles".into(),
            delivery_radius: "500 km".into(),
            average_delivery_time: "24-48 hours".into(),
            temperature_controlled: true,
            gps_tracking: true,
            last_mile_partners: strings(&["BlueDart", "DTDC", "Local Couriers"]),
        },
        performance: PerformanceMetrics {
            monthly_volume: "50,000 kg".into(),
            on_time_delivery: "98.5%".into(),
            customer_satisfaction: "4.8/5".into(),
            return_rate: "0.2%".into(),
            network_coverage: "12 states".into(),
        },
        location: FacilityLocation {
            facility: "Mumbai Distribution Hub".into(),
            address: "Andheri Industrial Estate, Mumbai, Maharashtra, India".into(),
            coordinates: "19.1136° N, 72.8697° E".into(),
            storage_capacity: None,
            warehouse_size: Some("25,000 sq ft".into()),
        },
        blockchain: proof(
            "0x3c4d5e6f7890abcdef1234567890abcd",
            "0xcdef1234567890abcdef1234567890cd",
            "15,234,569",
            at(2024, 1, 22, 10, 45),
        ),
    }
}

pub(crate) fn manufacturer() -> ManufacturerRecord {
    let product = |name: &str, quantity: &str, packaging: &str| FinalProduct {
        name: name.into(),
        quantity: quantity.into(),
        packaging: packaging.into(),
    };

    ManufacturerRecord {
        profile: CompanyProfile {
            name: "Pure Ayurveda Pvt Ltd.".into(),
            email: "quality@pureayurveda.com".into(),
            image: "/manufacturer-company-logo.png".into(),
            phone: "+91 98765 43213".into(),
            license: "AYU-MFG-2024-001".into(),
            established: "2010".into(),
            gst_number: None,
            gmp_certified: Some(true),
            iso_certified: Some("ISO 9001:2015".into()),
        },
        manufacturing: ManufacturingDetails {
            batch_id: DEMO_BATCH_ID.into(),
            herb_name: "Ashwagandha".into(),
            quantity_received: "480 kg".into(),
            final_products: vec![
                product("Ashwagandha Powder", "200 kg", "500g pouches"),
                product("Ashwagandha Capsules", "150,000 capsules", "60-count bottles"),
                product("Ashwagandha Extract", "50 kg", "100ml bottles"),
            ],
            manufacturing_date: "2024-01-25".into(),
            expiry_date: "2026-01-25".into(),
            quality_tests: strings(&["Heavy Metals", "Microbial", "Pesticide Residue", "Potency"]),
            batch_certificate: "BC-ASH-2024-001".into(),
        },
        quality_control: QualityControl {
            lab_tested: true,
            testing_lab: "NABL Accredited Lab".into(),
            test_results: TestResults {
                purity: "99.8%".into(),
                potency: "5.2% Withanolides".into(),
                heavy_metals: "Within Limits".into(),
                microbial: "Passed".into(),
                pesticides: "Not Detected".into(),
            },
            certifications: strings(&["AYUSH", "FSSAI", "GMP", "ISO"]),
        },
        facility: ManufacturingFacility {
            name: "Pune Manufacturing Unit".into(),
            address: "MIDC Industrial Area, Pune, Maharashtra, India".into(),
            coordinates: "18.5204° N, 73.8567° E".into(),
            capacity: "100 tons/month".into(),
            clean_room_grade: "Grade D".into(),
            employees: "150+".into(),
        },
        blockchain: proof(
            "0x4d5e6f7890abcdef1234567890abcdef",
            "0xdef1234567890abcdef1234567890def",
            "15,234,570",
            at(2024, 1, 25, 16, 20),
        ),
    }
}

pub(crate) fn demo_batch() -> BatchTrail {
    let stage = |role: Role, actor_id: &str, action: &str, location: &str| StageRef {
        role,
        actor_id: actor_id.into(),
        action: action.into(),
        location: location.into(),
    };

    BatchTrail {
        batch_id: DEMO_BATCH_ID.into(),
        herb_name: "Ashwagandha".into(),
        stages: vec![
            stage(
                Role::Farmer,
                "farmer-001",
                "Herb Cultivation",
                "Bhubaneswar, Odisha, India",
            ),
            stage(
                Role::Collector,
                "collector-001",
                "Quality Collection",
                "Kochi, Kerala",
            ),
            stage(
                Role::Distributor,
                "distributor-001",
                "Distribution Processing",
                "Mumbai, Maharashtra",
            ),
            stage(
                Role::Manufacturer,
                "manufacturer-001",
                "Final Processing",
                "Pune, Maharashtra",
            ),
        ],
    }
}

pub(crate) fn demo_ledger() -> Ledger {
    let mut ledger = Ledger::default();
    ledger.farmers.insert("farmer-001".into(), farmer());
    ledger.collectors.insert("collector-001".into(), collector());
    ledger.distributors.insert("distributor-001".into(), distributor());
    ledger.manufacturers.insert("manufacturer-001".into(), manufacturer());
    ledger.batches.insert(DEMO_BATCH_ID.into(), demo_batch());
    ledger
}
