//! Embedded scheme dataset and the list of supported states

use super::{Jurisdictions, Scheme, SchemeContact};

/// States accepted as jurisdiction filters
pub const SUPPORTED_STATES: [&str; 28] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
];

pub fn supported_states() -> &'static [&'static str] {
    &SUPPORTED_STATES
}

fn scheme(
    name: &str,
    description: &str,
    eligibility: &str,
    coverage: &str,
    jurisdictions: Jurisdictions,
    helpline: &str,
    website: &str,
) -> Scheme {
    Scheme {
        name: name.to_string(),
        description: description.to_string(),
        eligibility: eligibility.to_string(),
        coverage: coverage.to_string(),
        jurisdictions,
        contact: SchemeContact {
            helpline: helpline.to_string(),
            website: website.to_string(),
        },
    }
}

/// The catalog shipped with the binary
pub fn builtin_schemes() -> Vec<Scheme> {
    vec![
        scheme(
            "PMJAY - Ayushman Bharat",
            "Health insurance scheme for poor and vulnerable families",
            "BPL families, SECC beneficiaries",
            "Up to ₹5 lakhs per family per year",
            Jurisdictions::all(),
            "14555",
            "https://pmjay.gov.in",
        ),
        scheme(
            "UP State Health Scheme",
            "Uttar Pradesh state health insurance scheme",
            "UP residents, BPL families",
            "Up to ₹5 lakhs per family per year",
            Jurisdictions::new(["Uttar Pradesh"]),
            "1800-180-5145",
            "https://uphealthup.gov.in",
        ),
        scheme(
            "Mahatma Jyotiba Phule Jan Arogya Yojana",
            "Maharashtra state cashless health insurance scheme for hospitalisation",
            "Maharashtra residents holding yellow, orange or white ration cards",
            "Up to ₹5 lakhs per family per year",
            Jurisdictions::new(["Maharashtra"]),
            "155388",
            "https://www.jeevandayee.gov.in",
        ),
        scheme(
            "Chief Minister's Comprehensive Health Insurance Scheme",
            "Tamil Nadu state health insurance scheme for low income families",
            "Tamil Nadu residents with annual family income below ₹1.2 lakhs",
            "Up to ₹5 lakhs per family per year",
            Jurisdictions::new(["Tamil Nadu"]),
            "1800-425-3993",
            "https://www.cmchistn.com",
        ),
    ]
}
