use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Intake record: demographics, health, housing and services.
///
/// Every scalar value is kept as the text the care manager typed. `bmi` is
/// derived from `height` and `weight` whenever either changes through
/// [`FaceSheetData::set`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FaceSheetData {
    // Consultation and demographics
    pub consultation_date: String,
    pub consultation_method: String,
    pub referral_path: String,
    pub user_name: String,
    pub user_gender: String,
    pub user_dob: String,
    pub user_age: String,
    pub user_address: String,
    pub user_tel: String,
    pub care_level: String,
    pub care_period: String,
    pub disability_level: String,
    pub economic_status: String,
    pub family_members: Vec<FamilyMember>,
    pub genogram_url: Option<String>,
    pub life_history: String,
    pub user_aspiration: String,
    pub family_aspiration: String,

    // Health
    pub physical_independence: String,
    pub cognitive_independence: String,
    pub height: String,
    pub weight: String,
    pub bmi: String,
    pub blood_pressure: String,
    pub doctor_name: String,
    pub hospital_name: String,
    pub doctor_contact: String,
    pub medical_history: String,
    pub paralysis_contracture: String,
    pub pain_numbness: String,
    pub medication_status: String,
    pub medication_types: String,
    pub infections: String,
    pub allergies: String,
    pub bpsd_symptoms: String,

    // Housing and services
    pub housing_type: String,
    pub housing_ownership: String,
    pub has_own_room: String,
    pub is_solo_during_day: String,
    pub has_bath: String,
    pub toilet_type: String,
    pub has_steps: String,
    pub has_renovation: String,
    pub flooring_material: String,
    pub lighting_status: String,
    pub footwear_status: String,
    pub floor_plan_url: Option<String>,
    pub current_situation: String,
    pub service_utilization: String,
    pub formal_service: String,
    pub informal_service: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FamilyMember {
    pub name: String,
    pub address: String,
    pub age: String,
    pub gender: String,
    pub relationship: String,
    pub tel: String,
    pub health_status: String,
    pub is_key_person: bool,
}

/// Number of blank family rows on a new face sheet.
pub const DEFAULT_FAMILY_ROWS: usize = 3;

impl Default for FaceSheetData {
    fn default() -> Self {
        Self {
            consultation_date: String::new(),
            consultation_method: String::new(),
            referral_path: String::new(),
            user_name: String::new(),
            user_gender: String::new(),
            user_dob: String::new(),
            user_age: String::new(),
            user_address: String::new(),
            user_tel: String::new(),
            care_level: "not yet applied".to_string(),
            care_period: String::new(),
            disability_level: String::new(),
            economic_status: String::new(),
            family_members: vec![FamilyMember::default(); DEFAULT_FAMILY_ROWS],
            genogram_url: None,
            life_history: String::new(),
            user_aspiration: String::new(),
            family_aspiration: String::new(),
            physical_independence: String::new(),
            cognitive_independence: String::new(),
            height: String::new(),
            weight: String::new(),
            bmi: String::new(),
            blood_pressure: String::new(),
            doctor_name: String::new(),
            hospital_name: String::new(),
            doctor_contact: String::new(),
            medical_history: String::new(),
            paralysis_contracture: String::new(),
            pain_numbness: String::new(),
            medication_status: "independent".to_string(),
            medication_types: String::new(),
            infections: String::new(),
            allergies: String::new(),
            bpsd_symptoms: String::new(),
            housing_type: "owned (detached)".to_string(),
            housing_ownership: String::new(),
            has_own_room: "yes".to_string(),
            is_solo_during_day: "no".to_string(),
            has_bath: "yes".to_string(),
            toilet_type: "western".to_string(),
            has_steps: "no".to_string(),
            has_renovation: "no".to_string(),
            flooring_material: String::new(),
            lighting_status: String::new(),
            footwear_status: String::new(),
            floor_plan_url: None,
            current_situation: String::new(),
            service_utilization: String::new(),
            formal_service: String::new(),
            informal_service: String::new(),
        }
    }
}

/// Declares [`FaceSheetField`] together with its wire keys and the struct
/// field each variant reads and writes, so the three can never disagree.
macro_rules! face_sheet_fields {
    ($($variant:ident => $field:ident, $key:literal;)+) => {
        /// Allow-list of the scalar face sheet fields.
        ///
        /// This is the only way a field can be addressed by name: keys that
        /// do not resolve to a variant are rejected.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
        #[serde(rename_all = "camelCase")]
        #[ts(export)]
        pub enum FaceSheetField {
            $($variant,)+
        }

        impl FaceSheetField {
            pub const ALL: &'static [FaceSheetField] = &[$(FaceSheetField::$variant,)+];

            /// The camelCase key used on the wire and in response schemas.
            pub fn key(self) -> &'static str {
                match self {
                    $(FaceSheetField::$variant => $key,)+
                }
            }

            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some(FaceSheetField::$variant),)+
                    _ => None,
                }
            }
        }

        impl FaceSheetData {
            pub fn get(&self, field: FaceSheetField) -> &str {
                match field {
                    $(FaceSheetField::$variant => &self.$field,)+
                }
            }

            fn slot_mut(&mut self, field: FaceSheetField) -> &mut String {
                match field {
                    $(FaceSheetField::$variant => &mut self.$field,)+
                }
            }
        }
    };
}

face_sheet_fields! {
    ConsultationDate => consultation_date, "consultationDate";
    ConsultationMethod => consultation_method, "consultationMethod";
    ReferralPath => referral_path, "referralPath";
    UserName => user_name, "userName";
    UserGender => user_gender, "userGender";
    UserDob => user_dob, "userDob";
    UserAge => user_age, "userAge";
    UserAddress => user_address, "userAddress";
    UserTel => user_tel, "userTel";
    CareLevel => care_level, "careLevel";
    CarePeriod => care_period, "carePeriod";
    DisabilityLevel => disability_level, "disabilityLevel";
    EconomicStatus => economic_status, "economicStatus";
    LifeHistory => life_history, "lifeHistory";
    UserAspiration => user_aspiration, "userAspiration";
    FamilyAspiration => family_aspiration, "familyAspiration";
    PhysicalIndependence => physical_independence, "physicalIndependence";
    CognitiveIndependence => cognitive_independence, "cognitiveIndependence";
    Height => height, "height";
    Weight => weight, "weight";
    Bmi => bmi, "bmi";
    BloodPressure => blood_pressure, "bloodPressure";
    DoctorName => doctor_name, "doctorName";
    HospitalName => hospital_name, "hospitalName";
    DoctorContact => doctor_contact, "doctorContact";
    MedicalHistory => medical_history, "medicalHistory";
    ParalysisContracture => paralysis_contracture, "paralysisContracture";
    PainNumbness => pain_numbness, "painNumbness";
    MedicationStatus => medication_status, "medicationStatus";
    MedicationTypes => medication_types, "medicationTypes";
    Infections => infections, "infections";
    Allergies => allergies, "allergies";
    BpsdSymptoms => bpsd_symptoms, "bpsdSymptoms";
    HousingType => housing_type, "housingType";
    HousingOwnership => housing_ownership, "housingOwnership";
    HasOwnRoom => has_own_room, "hasOwnRoom";
    IsSoloDuringDay => is_solo_during_day, "isSoloDuringDay";
    HasBath => has_bath, "hasBath";
    ToiletType => toilet_type, "toiletType";
    HasSteps => has_steps, "hasSteps";
    HasRenovation => has_renovation, "hasRenovation";
    FlooringMaterial => flooring_material, "flooringMaterial";
    LightingStatus => lighting_status, "lightingStatus";
    FootwearStatus => footwear_status, "footwearStatus";
    CurrentSituation => current_situation, "currentSituation";
    ServiceUtilization => service_utilization, "serviceUtilization";
    FormalService => formal_service, "formalService";
    InformalService => informal_service, "informalService";
}

impl FaceSheetField {
    /// Fields computed from other fields rather than entered directly.
    pub fn is_derived(self) -> bool {
        matches!(self, FaceSheetField::Bmi)
    }
}

impl FaceSheetData {
    /// Set a scalar field. Changing height or weight recomputes BMI.
    pub fn set(&mut self, field: FaceSheetField, value: impl Into<String>) {
        let value = value.into();
        let slot = self.slot_mut(field);
        if *slot == value {
            return;
        }
        *slot = value;
        if matches!(field, FaceSheetField::Height | FaceSheetField::Weight) {
            self.recompute_bmi();
        }
    }

    /// Recompute BMI from height (cm) and weight (kg).
    ///
    /// Leaves the previous value untouched unless both parse as positive
    /// numbers.
    pub fn recompute_bmi(&mut self) {
        if let Some(bmi) = compute_bmi(&self.height, &self.weight) {
            self.bmi = bmi;
        }
    }
}

/// BMI = weight / (height / 100)², rendered with one decimal place.
pub fn compute_bmi(height_cm: &str, weight_kg: &str) -> Option<String> {
    let height = parse_positive(height_cm)?;
    let weight = parse_positive(weight_kg)?;
    let meters = height / 100.0;
    Some(format!("{:.1}", weight / (meters * meters)))
}

fn parse_positive(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}
