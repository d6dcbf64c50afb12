use serde::{Deserialize, Serialize};

/// A qualifying hospital as served by the query API.
///
/// Every field is a plain string; an absent value is `""`. Specialties and
/// facilities keep the source's comma-joined form, and the numeric counts keep
/// their textual form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalRecord {
    pub id: String,
    pub name: String,
    pub coordinates: String,
    pub location: String,
    pub category: String,
    pub care_type: String,
    pub medicine: String,
    pub address: String,
    pub state: String,
    pub district: String,
    pub subdistrict: String,
    pub pincode: String,
    pub telephone: String,
    pub mobile: String,
    pub emergency: String,
    pub ambulance: String,
    pub bloodbank: String,
    pub email: String,
    pub website: String,
    pub specialties: String,
    pub facilities: String,
    pub total_beds: String,
    pub private_wards: String,
    pub doctors: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let record = HospitalRecord {
            care_type: "Hospital".to_string(),
            total_beds: "50".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["careType"], "Hospital");
        assert_eq!(json["totalBeds"], "50");
    }
}
