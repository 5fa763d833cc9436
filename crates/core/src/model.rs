//! Member and household records.

use serde::{Deserialize, Serialize};

/// The eight per-person fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberField {
    Name,
    Relationship,
    Gender,
    BirthDate,
    IdCard,
    Nationality,
    Education,
    Occupation,
}

impl MemberField {
    /// All fields in the order they are rendered.
    pub const ALL: [MemberField; 8] = [
        MemberField::Name,
        MemberField::Relationship,
        MemberField::Gender,
        MemberField::BirthDate,
        MemberField::IdCard,
        MemberField::Nationality,
        MemberField::Education,
        MemberField::Occupation,
    ];

    /// Column headers accepted for this field, Chinese label first.
    #[must_use]
    pub const fn keys(self) -> [&'static str; 2] {
        match self {
            MemberField::Name => ["姓名", "name"],
            MemberField::Relationship => ["与户主关系", "relationship"],
            MemberField::Gender => ["性别", "gender"],
            MemberField::BirthDate => ["出生日期", "birthDate"],
            MemberField::IdCard => ["身份证号", "idCard"],
            MemberField::Nationality => ["民族", "nationality"],
            MemberField::Education => ["文化程度", "education"],
            MemberField::Occupation => ["职业", "occupation"],
        }
    }

    /// Display label, which is the Chinese column header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.keys()[0]
    }
}

/// One person's residency record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    pub relationship: String,
    pub gender: String,
    pub birth_date: String,
    pub id_card: String,
    pub nationality: String,
    pub education: String,
    pub occupation: String,
}

impl Member {
    /// Value of a single field.
    #[must_use]
    pub fn field(&self, field: MemberField) -> &str {
        match field {
            MemberField::Name => &self.name,
            MemberField::Relationship => &self.relationship,
            MemberField::Gender => &self.gender,
            MemberField::BirthDate => &self.birth_date,
            MemberField::IdCard => &self.id_card,
            MemberField::Nationality => &self.nationality,
            MemberField::Education => &self.education,
            MemberField::Occupation => &self.occupation,
        }
    }

    pub(crate) fn field_mut(&mut self, field: MemberField) -> &mut String {
        match field {
            MemberField::Name => &mut self.name,
            MemberField::Relationship => &mut self.relationship,
            MemberField::Gender => &mut self.gender,
            MemberField::BirthDate => &mut self.birth_date,
            MemberField::IdCard => &mut self.id_card,
            MemberField::Nationality => &mut self.nationality,
            MemberField::Education => &mut self.education,
            MemberField::Occupation => &mut self.occupation,
        }
    }
}

/// Residency records sharing one household id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    pub household_id: String,
    /// Address from the first row seen for this id; may be empty.
    pub address: String,
    /// Members in source row order.
    pub members: Vec<Member>,
}

impl Household {
    #[must_use]
    pub fn new(household_id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            household_id: household_id.into(),
            address: address.into(),
            members: Vec::new(),
        }
    }
}
