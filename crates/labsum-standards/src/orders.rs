//! Clinical display order of abbreviations within each category.

use labsum_model::{Category, GasParam};

const GENERAL: &[&str] = &[
    "Hb", "Ht", "VCM", "Leuco", "Plaq", "TGO", "TGP", "BT", "BD", "PT", "ALB", "INR", "R", "FA",
    "GGT", "AMIL", "LIP",
];

const RENAL: &[&str] = &["Cr", "Ur", "Na", "K", "Cl", "Ca", "CaI", "P", "Mg"];

const BLOOD_GAS: &[&str] = &[
    "GV.pH", "GV.pCO2", "GV.BIC", "GV.LAC", "GV.pO2", "GV.SO2", "GA.pH", "GA.pO2", "GA.pCO2",
    "GA.BIC", "GA.LAC", "GA.SO2",
];

const METABOLIC: &[&str] = &[
    "Glic", "HbGlic", "HDL", "LDL", "VLDL", "ColT", "Trig", "TSH", "T4L", "B12", "AF", "VitD",
    "PTH", "CPK", "Fe", "Ferritina", "CTLF", "STf", "DHL",
];

const RHEUMATOLOGIC: &[&str] = &[
    "PCR", "VHS", "FR", "FAN", "Anti-Ro", "Anti-La", "Anti-MPO", "Anti-PR3", "anti-dsDNA",
    "anti-Sm", "C3", "C4", "IFS", "EFPS", "Igk", "Igl", "RKL",
];

const THROMBOPHILIA: &[&str] = &[
    "Anticoagulante lúpico",
    "Anticardiolipina IgG",
    "Anticardiolipina IgM",
    "Anti-beta-2-glicoproteína",
    "Proteína C",
    "Proteína S",
    "Antitrombina III",
    "Mutação fator V de Leiden",
    "Mutação de protrombina",
    "Dosagem de homocisteína",
    "EFH",
    "DD",
    "Fibrinogênio",
];

const SEROLOGY: &[&str] = &[
    "HepB.Anti-HBc",
    "HepB.Anti-HBs",
    "HepB.Ag-HBs",
    "HepB.Ag-HBe",
    "HepC",
    "Anti-HIV",
    "VDRL",
    "CMV.IgG",
    "CMV.IgM",
    "VZV.IgG",
    "VZV.IgM",
    "HSV.IgG",
    "HSV.IgM",
    "HTLV.IgG",
    "HTLV.IgM",
    "TOXO.IgG",
    "TOXO.IgM",
];

const DRUG_LEVEL: &[&str] = &["VPA", "PHT", "LEV", "CBZ", "PB", "LTG"];

const CARDIAC: &[&str] = &["Tropo-T", "NT-proBNP"];

const URINALYSIS: &[&str] = &[
    "Leuco", "Hem", "Prot", "Nitrito", "EL", "Urob", "pH", "Dens", "Glic", "Sangue", "CC",
];

const CEREBROSPINAL_FLUID: &[&str] = &[
    "Cel", "Hem", "Prot", "Glic", "Lac", "ADA", "Aspecto", "Gram", "Cultura", "CultMico", "BAAR",
    "RT-TB", "Onco", "BOC", "VDRL", "Crypto", "EFP",
];

/// Venous gas parameters shown in the flat summary. Arterial shows all six.
pub const FLAT_VENOUS_PARAMS: [GasParam; 4] = [
    GasParam::Ph,
    GasParam::Pco2,
    GasParam::Bicarbonate,
    GasParam::Lactate,
];

/// Abbreviations of a category in clinical order.
pub fn clinical_order(category: Category) -> &'static [&'static str] {
    match category {
        Category::General => GENERAL,
        Category::Renal => RENAL,
        Category::BloodGas => BLOOD_GAS,
        Category::Metabolic => METABOLIC,
        Category::Rheumatologic => RHEUMATOLOGIC,
        Category::Thrombophilia => THROMBOPHILIA,
        Category::Serology => SEROLOGY,
        Category::DrugLevel => DRUG_LEVEL,
        Category::Cardiac => CARDIAC,
        Category::Urinalysis => URINALYSIS,
        Category::CerebrospinalFluid => CEREBROSPINAL_FLUID,
        Category::Suppressed => &[],
    }
}

/// Position of `abbreviation` in its category's clinical order.
pub fn clinical_rank(category: Category, abbreviation: &str) -> Option<usize> {
    clinical_order(category)
        .iter()
        .position(|candidate| *candidate == abbreviation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::default_dictionary;
    use labsum_model::GasKind;
    use std::collections::HashSet;

    #[test]
    fn orders_have_no_duplicates() {
        for category in Category::RENDERED {
            let order = clinical_order(category);
            let unique: HashSet<_> = order.iter().collect();
            assert_eq!(unique.len(), order.len(), "{category:?}");
        }
    }

    #[test]
    fn gas_order_covers_every_parameter() {
        for kind in [GasKind::Venous, GasKind::Arterial] {
            for param in GasParam::ALL {
                let abbreviation = param.abbreviation(kind);
                assert!(clinical_rank(Category::BloodGas, &abbreviation).is_some());
            }
        }
    }

    #[test]
    fn dictionary_abbreviations_are_ordered() {
        for entry in default_dictionary().iter() {
            if let Some(abbreviation) = entry.abbreviation() {
                assert!(
                    clinical_rank(entry.category, abbreviation).is_some(),
                    "{abbreviation} missing from {:?}",
                    entry.category
                );
            }
        }
    }

    #[test]
    fn rank_lookup() {
        assert_eq!(clinical_rank(Category::Renal, "Cr"), Some(0));
        assert_eq!(clinical_rank(Category::Renal, "Hb"), None);
        assert!(clinical_order(Category::Suppressed).is_empty());
    }
}
