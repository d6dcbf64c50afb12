/// Column names in the national hospital directory CSV.
pub mod columns {
    pub const ID: &str = "Sr_No";
    pub const NAME: &str = "Hospital_Name";
    pub const COORDINATES: &str = "Location_Coordinates";
    pub const LOCATION: &str = "Location";
    pub const CATEGORY: &str = "Hospital_Category";
    pub const CARE_TYPE: &str = "Hospital_Care_Type";
    pub const MEDICINE: &str = "Discipline_Systems_of_Medicine";
    pub const ADDRESS: &str = "Address_Original_First_Line";
    pub const STATE: &str = "State";
    pub const DISTRICT: &str = "District";
    pub const SUBDISTRICT: &str = "Subdistrict";
    pub const PINCODE: &str = "Pincode";
    pub const TELEPHONE: &str = "Telephone";
    pub const MOBILE: &str = "Mobile_Number";
    pub const EMERGENCY: &str = "Emergency_Num";
    pub const AMBULANCE: &str = "Ambulance_Phone_No";
    pub const BLOODBANK: &str = "Bloodbank_Phone_No";
    pub const EMAIL: &str = "Hospital_Primary_Email_Id";
    pub const WEBSITE: &str = "Website";
    pub const SPECIALTIES: &str = "Specialties";
    pub const FACILITIES: &str = "Facilities";
    pub const TOTAL_BEDS: &str = "Total_Num_Beds";
    pub const PRIVATE_WARDS: &str = "Number_Private_Wards";
    pub const DOCTORS: &str = "Number_Doctor";
}

/// Placeholder the source uses for "no value".
pub const ABSENT_PLACEHOLDER: &str = "0";

pub const REQUIRED_MEDICINE_SYSTEM: &str = "allopathy";

pub const EXCLUDED_CATEGORY_TERMS: &[&str] = &["dispensary", "nursing"];

// "nursing" also covers "nursing home", "nursing-home" and "nursinghome"
pub const EXCLUDED_NAME_TERMS: &[&str] = &[
    "children",
    "child",
    "nursing",
    "clinic",
    "dispensary",
    "health center",
    "health centre",
    "healthcare center",
    "healthcare centre",
];

pub const EXCLUDED_SPECIALTY_TERMS: &[&str] = &["pediatric", "children"];

pub const EXCLUDED_CARE_TYPE_TERMS: &[&str] = &["nursing"];

pub const DEFAULT_MIN_BEDS: i64 = 10;
pub const DEFAULT_MIN_DOCTORS: i64 = 2;
