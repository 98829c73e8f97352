//! Faculties and the department catalog

use serde::{Deserialize, Serialize};

/// The student's school
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Faculty {
    #[default]
    #[serde(rename = "Tıp Fakültesi")]
    MedicineFaculty,
    #[serde(rename = "Eczacılık Fakültesi")]
    PharmacyFaculty,
}

impl Faculty {
    /// Display name for the faculty
    pub fn name(&self) -> &'static str {
        match self {
            Faculty::MedicineFaculty => "Tıp Fakültesi",
            Faculty::PharmacyFaculty => "Eczacılık Fakültesi",
        }
    }

    /// Parse the short command-line form (`medicine` / `pharmacy`)
    pub fn from_short_name(name: &str) -> Option<Self> {
        match name {
            "medicine" | "tip" => Some(Faculty::MedicineFaculty),
            "pharmacy" | "eczacilik" => Some(Faculty::PharmacyFaculty),
            _ => None,
        }
    }
}

/// Which faculty a department is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFaculty {
    Medicine,
    Pharmacy,
    Both,
}

impl TargetFaculty {
    /// Whether students of `faculty` are the intended audience
    pub fn includes(&self, faculty: Faculty) -> bool {
        matches!(
            (self, faculty),
            (TargetFaculty::Both, _)
                | (TargetFaculty::Medicine, Faculty::MedicineFaculty)
                | (TargetFaculty::Pharmacy, Faculty::PharmacyFaculty)
        )
    }
}

/// A browsable group of cases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
    pub description: String,
    pub target_faculty: TargetFaculty,
    pub case_count: u32,
    pub ai_features: Vec<String>,
}

impl Department {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        target_faculty: TargetFaculty,
        case_count: u32,
        ai_features: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            target_faculty,
            case_count,
            ai_features: ai_features.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Medicine-focused departments
pub fn medicine_departments() -> Vec<Department> {
    vec![
        Department::new(
            "cardiology",
            "Kardiyoloji",
            "Kalp ve damar hastalıkları tanı ve tedavi süreçleri",
            TargetFaculty::Medicine,
            34,
            &["AI Tanı Desteği", "Semptom Analizi", "Tedavi Önerileri"],
        ),
        Department::new(
            "neurology",
            "Nöroloji",
            "Beyin ve sinir sistemi hastalıklarında tanı süreci",
            TargetFaculty::Medicine,
            28,
            &["Nörolog AI", "Semptom Korelasyonu", "Görüntü Analizi"],
        ),
        Department::new(
            "pediatrics",
            "Pediatri",
            "Çocuk hastalıkları ve gelişim bozuklukları",
            TargetFaculty::Medicine,
            22,
            &["Çocuk AI Uzmanı", "Yaş-Semptom Analizi"],
        ),
        Department::new(
            "emergency",
            "Acil Tıp",
            "Acil durum triajı ve hızlı tanı süreçleri",
            TargetFaculty::Medicine,
            45,
            &["Hızlı AI Tanı", "Triaj Desteği", "Kritik Süre Yönetimi"],
        ),
    ]
}

/// Pharmacy-focused departments
pub fn pharmacy_departments() -> Vec<Department> {
    vec![
        Department::new(
            "clinical-pharmacy",
            "Klinik Eczacılık",
            "İlaç etkileşimleri ve dozaj optimizasyonu",
            TargetFaculty::Pharmacy,
            38,
            &["İlaç AI Uzmanı", "Etkileşim Kontrolü", "Dozaj Hesaplama"],
        ),
        Department::new(
            "pharmacology",
            "Farmakoloji",
            "İlaç mekanizmaları ve farmakokinetik analizi",
            TargetFaculty::Pharmacy,
            31,
            &["Farmako AI", "Metabolizma Analizi", "Kinetik Modelleme"],
        ),
        Department::new(
            "pharmaceutical-care",
            "Eczacılık Bakımı",
            "Hasta odaklı ilaç takibi ve danışmanlık",
            TargetFaculty::Pharmacy,
            26,
            &["Hasta AI Analizi", "Takip Sistemi", "Danışmanlık Desteği"],
        ),
        Department::new(
            "drug-safety",
            "İlaç Güvenliği",
            "Advers etki analizi ve güvenlik değerlendirmesi",
            TargetFaculty::Pharmacy,
            19,
            &["Güvenlik AI", "Advers Etki Tahmini", "Risk Analizi"],
        ),
    ]
}

/// Departments shared by both faculties
pub fn collaborative_departments() -> Vec<Department> {
    vec![
        Department::new(
            "interdisciplinary",
            "Disiplinler Arası",
            "Tıp ve eczacılık işbirliği gerektiren vakalar",
            TargetFaculty::Both,
            15,
            &["Hibrit AI", "Çapraz Danışmanlık", "Ekip Çalışması"],
        ),
        Department::new(
            "precision-medicine",
            "Kişiselleştirilmiş Tıp",
            "Genetik tabanlı tanı ve tedavi özelleştirmesi",
            TargetFaculty::Both,
            12,
            &["Genetik AI", "Kişisel Profil", "Özel Dozaj"],
        ),
    ]
}

/// The departments a student of `faculty` browses: their own, then the shared ones
pub fn departments_for_faculty(faculty: Faculty) -> Vec<Department> {
    let mut departments = match faculty {
        Faculty::MedicineFaculty => medicine_departments(),
        Faculty::PharmacyFaculty => pharmacy_departments(),
    };
    departments.extend(collaborative_departments());
    departments
}

/// Every department in the catalog
pub fn all_departments() -> Vec<Department> {
    let mut departments = medicine_departments();
    departments.extend(pharmacy_departments());
    departments.extend(collaborative_departments());
    departments
}

/// Look up a department by id
pub fn find_department(id: &str) -> Option<Department> {
    all_departments().into_iter().find(|d| d.id == id)
}
