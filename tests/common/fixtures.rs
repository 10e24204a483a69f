//! Test fixtures
//!
//! Asset payloads as the front end and connectors submit them, plus sample
//! upstream documents.

use serde_json::{json, Value};

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Clear vehicle seized for debt
pub fn clear_vehicle() -> Value {
    json!({
        "type": "vehicle",
        "seizureReason": "debt",
        "legalStatus": { "unSanctionsCompliance": true, "localCourtOrder": "MT/COURT/2025-112" },
        "description": "2019 Toyota Hilux, white",
        "value": "€18,000",
        "origin": "Malta",
        "source": "Court Registry",
        "dateAdded": now()
    })
}

/// Vessel from a sanctioned origin whose description carries identifiers.
/// The caller claims compliance; storage must override it.
pub fn sanctioned_vessel() -> Value {
    json!({
        "type": "vessel",
        "seizureReason": "contraband",
        "legalStatus": { "unSanctionsCompliance": true },
        "imoNumber": "9456782",
        "description": "Tanker vessel \"Black Sea Star\" operated by Mr. Ivan Petrov, passport #X1234567",
        "origin": "Russia",
        "source": "Customs Department",
        "dateAdded": now()
    })
}

/// Currency seizure with one long and one short serial
pub fn currency_with_serials() -> Value {
    json!({
        "type": "currency",
        "seizureReason": "contraband",
        "legalStatus": { "unSanctionsCompliance": true },
        "contrabandType": "currency",
        "description": "Cash bundle found in hand luggage",
        "value": "€40,000",
        "origin": "Malta",
        "source": "Customs Department",
        "dateAdded": now(),
        "serialNumbers": ["EUR200B99887766", "A1B2"]
    })
}

/// Property seized under sanctions with no other signal, so it is blocked
pub fn sanctions_property() -> Value {
    json!({
        "type": "real_estate",
        "seizureReason": "sanctions",
        "legalStatus": { "unSanctionsCompliance": false },
        "description": "Waterfront apartment in Sliema",
        "origin": "Malta",
        "source": "Court Registry",
        "dateAdded": now()
    })
}

/// Customs report with one sanctioned cash seizure and one clear vehicle
pub const CUSTOMS_REPORT: &str = "\
type,origin,value,serials,make,model,year
Cash,Russia,120000,RUB5000AA112233;RUB5000AA445566,,,
Vehicle,Malta,18000,,Toyota,Hilux,2019
";

/// Notices page with one complete warrant and one without a reference
pub const WARRANT_NOTICES: &str = r#"<html><body>
<h3>Warrant of Arrest notice, reference to follow</h3>
<p>Warrant of Arrest MT/ARR/2025-087 against the vessel "Ocean Pearl" (IMO 9556677), claim &euro;214,500.</p>
<p>Office hours are 08:00 to 14:00.</p>
</body></html>"#;
