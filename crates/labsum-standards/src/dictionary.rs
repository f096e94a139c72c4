//! Exam synonym dictionary.
//!
//! Source text names the same exam many ways ("SÓDIO", "SODIO", "Sódio
//! sérico"). Each [`ExamDefinition`] maps one synonym to its canonical
//! abbreviation. [`ExamDictionary`] keeps the entries sorted by synonym length
//! descending so a compound name is always tried before any of its
//! substrings; suppressed entries use this to block shorter synonyms
//! ("COLESTEROL NÃO-HDL" must never be read as "HDL").

use std::sync::LazyLock;

use labsum_model::{Category, ExamDefinition};

const MG_DL: Option<&str> = Some("mg/dL");
const U_L: Option<&str> = Some("U/L");
const MEQ_L: Option<&str> = Some("mEq/L");
const UG_ML: Option<&str> = Some("µg/mL");

use Category::{
    Cardiac, CerebrospinalFluid as Csf, DrugLevel, General, Metabolic, Renal, Rheumatologic,
    Serology, Thrombophilia,
};

const fn def(
    synonym: &'static str,
    abbreviation: &'static str,
    category: Category,
    unit: Option<&'static str>,
) -> ExamDefinition {
    ExamDefinition::new(synonym, abbreviation, category, unit)
}

/// Entry reported without a unit. Extraction still follows the category:
/// only serology reads a qualitative result.
const fn unitless(synonym: &'static str, abbreviation: &'static str, category: Category) -> ExamDefinition {
    ExamDefinition::new(synonym, abbreviation, category, None)
}

/// Raw dictionary entries, in no particular order.
static ENTRIES: &[ExamDefinition] = &[
    // Blood count (outside a full CBC report)
    def("HEMOGLOBINA", "Hb", General, Some("g/dL")),
    def("HEMATÓCRITO", "Ht", General, Some("%")),
    def("HEMATOCRITO", "Ht", General, Some("%")),
    def("VCM", "VCM", General, Some("fL")),
    def("LEUCÓCITOS", "Leuco", General, Some("mil/mm³")),
    def("LEUCOCITOS", "Leuco", General, Some("mil/mm³")),
    def("PLAQUETAS", "Plaq", General, Some("mil/mm³")),
    // Liver and pancreas
    def("TGO", "TGO", General, U_L),
    def("AST", "TGO", General, U_L),
    def("ASPARTATO AMINOTRANSFERASE", "TGO", General, U_L),
    def("TGP", "TGP", General, U_L),
    def("ALT", "TGP", General, U_L),
    def("ALANINA AMINOTRANSFERASE", "TGP", General, U_L),
    def("BILIRRUBINA TOTAL", "BT", General, MG_DL),
    def("BILIRRUBINA DIRETA", "BD", General, MG_DL),
    def("PROTEÍNAS TOTAIS", "PT", General, Some("g/dL")),
    def("PROTEINAS TOTAIS", "PT", General, Some("g/dL")),
    def("ALBUMINA", "ALB", General, Some("g/dL")),
    def("FOSFATASE ALCALINA", "FA", General, U_L),
    def("GAMA GT", "GGT", General, U_L),
    def("GAMA-GT", "GGT", General, U_L),
    def("GAMA GLUTAMIL TRANSFERASE", "GGT", General, U_L),
    def("GGT", "GGT", General, U_L),
    def("AMILASE", "AMIL", General, U_L),
    def("LIPASE", "LIP", General, U_L),
    // Renal function and electrolytes
    def("CREATININA", "Cr", Renal, MG_DL),
    def("URÉIA", "Ur", Renal, MG_DL),
    def("UREIA", "Ur", Renal, MG_DL),
    def("SÓDIO", "Na", Renal, MEQ_L),
    def("SODIO", "Na", Renal, MEQ_L),
    def("POTÁSSIO", "K", Renal, MEQ_L),
    def("POTASSIO", "K", Renal, MEQ_L),
    def("CLORO", "Cl", Renal, MEQ_L),
    def("CÁLCIO TOTAL", "Ca", Renal, MG_DL),
    def("CALCIO TOTAL", "Ca", Renal, MG_DL),
    def("CÁLCIO IÔNICO", "CaI", Renal, MG_DL),
    def("CALCIO IONICO", "CaI", Renal, MG_DL),
    def("FÓSFORO", "P", Renal, MG_DL),
    def("FOSFORO", "P", Renal, MG_DL),
    def("MAGNÉSIO", "Mg", Renal, MG_DL),
    def("MAGNESIO", "Mg", Renal, MG_DL),
    // Coagulation markers reported with the thrombophilia workup
    def("D-DÍMERO", "DD", Thrombophilia, Some("ng/mL")),
    def("D-DIMERO", "DD", Thrombophilia, Some("ng/mL")),
    def("DÍMERO-D", "DD", Thrombophilia, Some("ng/mL")),
    def("DIMERO-D", "DD", Thrombophilia, Some("ng/mL")),
    def("DOSAGEM DO DÍMERO-D QUANTITATIVO", "DD", Thrombophilia, Some("ng/mL")),
    def("FIBRINOGÊNIO", "Fibrinogênio", Thrombophilia, MG_DL),
    def("FIBRINOGENIO", "Fibrinogênio", Thrombophilia, MG_DL),
    // Serologies
    unitless("ANTI-HBC", "HepB.Anti-HBc", Serology),
    unitless("ANTI-HBC TOTAL", "HepB.Anti-HBc", Serology),
    unitless("HEPATITE B - ANTI-HBC TOTAL", "HepB.Anti-HBc", Serology),
    unitless("ANTI-HBS", "HepB.Anti-HBs", Serology),
    unitless("HEPATITE B - ANTI-HBS", "HepB.Anti-HBs", Serology),
    unitless("AGHBS", "HepB.Ag-HBs", Serology),
    unitless("AG-HBS", "HepB.Ag-HBs", Serology),
    unitless("HEPATITE B - AGHBS", "HepB.Ag-HBs", Serology),
    unitless("AGHBE", "HepB.Ag-HBe", Serology),
    unitless("HEPATITE B - AGHBE", "HepB.Ag-HBe", Serology),
    unitless("ANTI-HCV", "HepC", Serology),
    unitless("HEPATITE C", "HepC", Serology),
    unitless("HEPATITE C - SOROLOGIA", "HepC", Serology),
    unitless("ANTI-HIV", "Anti-HIV", Serology),
    unitless("HIV", "Anti-HIV", Serology),
    unitless("VDRL", "VDRL", Serology),
    unitless("TREPONEMA PALLIDUM", "VDRL", Serology),
    unitless("SOROLOGIA PARA TREPONEMA PALLIDUM", "VDRL", Serology),
    unitless("CMV IGG", "CMV.IgG", Serology),
    unitless("CMV IGM", "CMV.IgM", Serology),
    unitless("CITOMEGALOVIRUS IGG", "CMV.IgG", Serology),
    unitless("CITOMEGALOVIRUS IGM", "CMV.IgM", Serology),
    unitless("VARICELA IGG", "VZV.IgG", Serology),
    unitless("VARICELA IGM", "VZV.IgM", Serology),
    unitless("VZV IGG", "VZV.IgG", Serology),
    unitless("VZV IGM", "VZV.IgM", Serology),
    unitless("HERPES SIMPLES IGG", "HSV.IgG", Serology),
    unitless("HERPES SIMPLES IGM", "HSV.IgM", Serology),
    unitless("HSV IGG", "HSV.IgG", Serology),
    unitless("HSV IGM", "HSV.IgM", Serology),
    unitless("HTLV IGG", "HTLV.IgG", Serology),
    unitless("HTLV IGM", "HTLV.IgM", Serology),
    unitless("TOXOPLASMOSE IGG", "TOXO.IgG", Serology),
    unitless("TOXOPLASMOSE IGM", "TOXO.IgM", Serology),
    unitless("TOXOPLASMA IGG", "TOXO.IgG", Serology),
    unitless("TOXOPLASMA IGM", "TOXO.IgM", Serology),
    // Metabolic
    def("GLICOSE", "Glic", Metabolic, MG_DL),
    def("GLICEMIA", "Glic", Metabolic, MG_DL),
    def("HEMOGLOBINA GLICADA", "HbGlic", Metabolic, Some("%")),
    def("HBA1C", "HbGlic", Metabolic, Some("%")),
    def("HDL", "HDL", Metabolic, MG_DL),
    def("HDL-COLESTEROL", "HDL", Metabolic, MG_DL),
    def("HDL - COLESTEROL", "HDL", Metabolic, MG_DL),
    def("LDL", "LDL", Metabolic, MG_DL),
    def("LDL-COLESTEROL", "LDL", Metabolic, MG_DL),
    def("LDL - COLESTEROL", "LDL", Metabolic, MG_DL),
    def("VLDL", "VLDL", Metabolic, MG_DL),
    def("VLDL - COLESTEROL", "VLDL", Metabolic, MG_DL),
    def("COLESTEROL TOTAL", "ColT", Metabolic, MG_DL),
    def("TRIGLICÉRIDES", "Trig", Metabolic, MG_DL),
    def("TRIGLICERIDES", "Trig", Metabolic, MG_DL),
    def("TSH", "TSH", Metabolic, Some("µUI/mL")),
    def("HORMÔNIO TIREO-ESTIMULANTE", "TSH", Metabolic, Some("µUI/mL")),
    def("T4 LIVRE", "T4L", Metabolic, Some("ng/dL")),
    def("T4L", "T4L", Metabolic, Some("ng/dL")),
    def("VITAMINA B12", "B12", Metabolic, Some("pg/mL")),
    def("VITAMINA B 12", "B12", Metabolic, Some("pg/mL")),
    def("B12", "B12", Metabolic, Some("pg/mL")),
    def("ÁCIDO FÓLICO", "AF", Metabolic, Some("ng/mL")),
    def("ACIDO FOLICO", "AF", Metabolic, Some("ng/mL")),
    def("VITAMINA D", "VitD", Metabolic, Some("ng/mL")),
    def("25-HIDROXIVITAMINA D", "VitD", Metabolic, Some("ng/mL")),
    def("PTH", "PTH", Metabolic, Some("pg/mL")),
    def("PARATORMÔNIO", "PTH", Metabolic, Some("pg/mL")),
    def("CPK", "CPK", Metabolic, U_L),
    def("CREATINOQUINASE", "CPK", Metabolic, U_L),
    def("FERRO", "Fe", Metabolic, Some("µg/dL")),
    def("FERRO SÉRICO", "Fe", Metabolic, Some("µg/dL")),
    def("FERRITINA", "Ferritina", Metabolic, Some("ng/mL")),
    def("CAPACIDADE TOTAL DE LIGAÇÃO DO FERRO", "CTLF", Metabolic, Some("µg/dL")),
    def("CAPACIDADE TOTAL DE LIGAÇÃO DE FERRO", "CTLF", Metabolic, Some("µg/dL")),
    def("CTLF", "CTLF", Metabolic, Some("µg/dL")),
    def("SATURAÇÃO DE TRANSFERRINA", "STf", Metabolic, Some("%")),
    def("SATURAÇÃO DA TRANSFERRINA", "STf", Metabolic, Some("%")),
    def("DHL", "DHL", Metabolic, U_L),
    def("DESIDROGENASE LÁCTICA", "DHL", Metabolic, U_L),
    def("LDH", "DHL", Metabolic, U_L),
    // Non-HDL cholesterol is not reported; these entries shadow "HDL".
    ExamDefinition::suppressed("COLESTEROL NÃO-HDL"),
    ExamDefinition::suppressed("COLESTEROL NAO-HDL"),
    ExamDefinition::suppressed("COLESTEROL NÃO HDL"),
    ExamDefinition::suppressed("COLESTEROL NAO HDL"),
    ExamDefinition::suppressed("NÃO-HDL"),
    ExamDefinition::suppressed("NAO-HDL"),
    // Cardiac
    def("NT-PROBNP", "NT-proBNP", Cardiac, Some("pg/mL")),
    def("BNP", "NT-proBNP", Cardiac, Some("pg/mL")),
    def("TROPONINA", "Tropo-T", Cardiac, Some("ng/L")),
    def("TROPONINA T", "Tropo-T", Cardiac, Some("ng/L")),
    def("TROPONINA I", "Tropo-T", Cardiac, Some("ng/L")),
    def("TROPONINA I ULTRASENSÍVEL", "Tropo-T", Cardiac, Some("ng/L")),
    // Rheumatologic / autoimmune
    def("PCR", "PCR", Rheumatologic, Some("mg/L")),
    def("PROTEÍNA C REATIVA", "PCR", Rheumatologic, Some("mg/L")),
    def("PROTEINA C REATIVA", "PCR", Rheumatologic, Some("mg/L")),
    def("PROTEÍNA C REATIVA (PCR)", "PCR", Rheumatologic, Some("mg/L")),
    def("VHS", "VHS", Rheumatologic, Some("mm")),
    def("VELOCIDADE DE HEMOSSEDIMENTAÇÃO", "VHS", Rheumatologic, Some("mm")),
    unitless("FATOR REUMATÓIDE", "FR", Rheumatologic),
    unitless("FATOR REUMATOIDE", "FR", Rheumatologic),
    unitless("FR", "FR", Rheumatologic),
    unitless("FAN", "FAN", Rheumatologic),
    unitless("FATOR ANTINUCLEAR", "FAN", Rheumatologic),
    unitless("ANTI-RO", "Anti-Ro", Rheumatologic),
    unitless("ANTI-SSA", "Anti-Ro", Rheumatologic),
    unitless("ANTI-LA", "Anti-La", Rheumatologic),
    unitless("ANTI-SSB", "Anti-La", Rheumatologic),
    unitless("ANTI-MPO", "Anti-MPO", Rheumatologic),
    unitless("P-ANCA", "Anti-MPO", Rheumatologic),
    unitless("ANTI-PR3", "Anti-PR3", Rheumatologic),
    unitless("C-ANCA", "Anti-PR3", Rheumatologic),
    unitless("ANTI-DSDNA", "anti-dsDNA", Rheumatologic),
    unitless("ANTI-DNA", "anti-dsDNA", Rheumatologic),
    unitless("ANTI-SM", "anti-Sm", Rheumatologic),
    def("C3", "C3", Rheumatologic, MG_DL),
    def("COMPLEMENTO C3", "C3", Rheumatologic, MG_DL),
    def("FRAÇÃO C3 DO COMPLEMENTO", "C3", Rheumatologic, MG_DL),
    def("C4", "C4", Rheumatologic, MG_DL),
    def("COMPLEMENTO C4", "C4", Rheumatologic, MG_DL),
    def("FRAÇÃO C4 DO COMPLEMENTO", "C4", Rheumatologic, MG_DL),
    unitless("IMUNOFIXAÇÃO", "IFS", Rheumatologic),
    unitless("ELETROFORESE DE PROTEÍNAS", "EFPS", Rheumatologic),
    def("IGK", "Igk", Rheumatologic, MG_DL),
    def("IMUNOGLOBULINA KAPPA", "Igk", Rheumatologic, MG_DL),
    def("IGL", "Igl", Rheumatologic, MG_DL),
    def("IMUNOGLOBULINA LAMBDA", "Igl", Rheumatologic, MG_DL),
    unitless("RELAÇÃO KAPPA/LAMBDA", "RKL", Rheumatologic),
    // Thrombophilia
    unitless("ANTICOAGULANTE LÚPICO", "Anticoagulante lúpico", Thrombophilia),
    unitless("ANTICOAGULANTE LUPICO", "Anticoagulante lúpico", Thrombophilia),
    unitless("ANTICARDIOLIPINA IGG", "Anticardiolipina IgG", Thrombophilia),
    unitless("ANTICARDIOLIPINA IGM", "Anticardiolipina IgM", Thrombophilia),
    unitless("ANTI-BETA-2-GLICOPROTEÍNA", "Anti-beta-2-glicoproteína", Thrombophilia),
    unitless("PROTEÍNA C FUNCIONAL", "Proteína C", Thrombophilia),
    unitless("PROTEINA C FUNCIONAL", "Proteína C", Thrombophilia),
    unitless("PROTEÍNA S LIVRE", "Proteína S", Thrombophilia),
    unitless("PROTEINA S LIVRE", "Proteína S", Thrombophilia),
    unitless("ANTITROMBINA III", "Antitrombina III", Thrombophilia),
    unitless("ANTITROMBINA", "Antitrombina III", Thrombophilia),
    unitless("FATOR V DE LEIDEN", "Mutação fator V de Leiden", Thrombophilia),
    unitless("MUTAÇÃO DO FATOR V", "Mutação fator V de Leiden", Thrombophilia),
    unitless("MUTAÇÃO DA PROTROMBINA", "Mutação de protrombina", Thrombophilia),
    unitless("PROTROMBINA 20210", "Mutação de protrombina", Thrombophilia),
    unitless("HOMOCISTEÍNA", "Dosagem de homocisteína", Thrombophilia),
    unitless("HOMOCISTEINA", "Dosagem de homocisteína", Thrombophilia),
    unitless("ELETROFORESE DE HEMOGLOBINA", "EFH", Thrombophilia),
    // Anticonvulsant levels
    def("ÁCIDO VALPRÓICO", "VPA", DrugLevel, UG_ML),
    def("ACIDO VALPROICO", "VPA", DrugLevel, UG_ML),
    def("VALPROATO", "VPA", DrugLevel, UG_ML),
    def("FENITOÍNA", "PHT", DrugLevel, UG_ML),
    def("FENITOINA", "PHT", DrugLevel, UG_ML),
    def("LEVETIRACETAM", "LEV", DrugLevel, UG_ML),
    def("CARBAMAZEPINA", "CBZ", DrugLevel, UG_ML),
    def("FENOBARBITAL", "PB", DrugLevel, UG_ML),
    def("LAMOTRIGINA", "LTG", DrugLevel, UG_ML),
    // CSF analytes reported outside a CSF panel header
    def("PROTEÍNA TOTAL LCR", "Prot", Csf, MG_DL),
    def("PROTEÍNAS TOTAIS LCR", "Prot", Csf, MG_DL),
    def("GLICOSE LCR", "Glic", Csf, MG_DL),
    def("GLICORRAQUIA", "Glic", Csf, MG_DL),
    def("LACTATO LCR", "Lac", Csf, MG_DL),
    def("ADA LCR", "ADA", Csf, U_L),
    def("ADENOSINA DEAMINASE", "ADA", Csf, U_L),
    unitless("VDRL LCR", "VDRL", Csf),
    unitless("CRIPTOCOCO", "Crypto", Csf),
    unitless("CRYPTOCOCCUS", "Crypto", Csf),
    unitless("PESQUISA DE BAAR", "BAAR", Csf),
    unitless("RT-PCR TUBERCULOSE", "RT-TB", Csf),
    unitless("GENEXPERT", "RT-TB", Csf),
    unitless("BANDAS OLIGOCLONAIS", "BOC", Csf),
    unitless("ELETROFORESE LCR", "EFP", Csf),
];

/// Immutable exam dictionary ordered longest synonym first.
#[derive(Debug, Clone)]
pub struct ExamDictionary {
    entries: Vec<ExamDefinition>,
}

impl ExamDictionary {
    /// Builds a dictionary, sorting by synonym length (characters) descending.
    ///
    /// Ties are broken by synonym text so iteration order is total.
    pub fn new(entries: impl IntoIterator<Item = ExamDefinition>) -> Self {
        let mut entries: Vec<ExamDefinition> = entries.into_iter().collect();
        entries.sort_by(|a, b| {
            b.synonym_len()
                .cmp(&a.synonym_len())
                .then_with(|| a.synonym.cmp(b.synonym))
        });
        Self { entries }
    }

    /// Entries in match order.
    pub fn entries(&self) -> &[ExamDefinition] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExamDefinition> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the entry for an exact synonym (case-insensitive).
    pub fn get(&self, synonym: &str) -> Option<&ExamDefinition> {
        let wanted = synonym.trim().to_uppercase();
        self.entries.iter().find(|entry| entry.synonym == wanted)
    }

    /// Category a canonical abbreviation belongs to, from its first entry.
    pub fn category_of(&self, abbreviation: &str) -> Option<Category> {
        self.entries
            .iter()
            .find(|entry| entry.abbreviation() == Some(abbreviation))
            .map(|entry| entry.category)
    }
}

static DEFAULT_DICTIONARY: LazyLock<ExamDictionary> =
    LazyLock::new(|| ExamDictionary::new(ENTRIES.iter().copied()));

/// The built-in dictionary.
pub fn default_dictionary() -> &'static ExamDictionary {
    &DEFAULT_DICTIONARY
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sorted_longest_first() {
        let dictionary = default_dictionary();
        let lengths: Vec<usize> = dictionary.iter().map(ExamDefinition::synonym_len).collect();
        assert!(lengths.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn superstrings_precede_substrings() {
        let entries = default_dictionary().entries();
        for (i, earlier) in entries.iter().enumerate() {
            for later in &entries[i + 1..] {
                assert!(
                    !later.synonym.contains(earlier.synonym),
                    "{} contains {} but is tried after it",
                    later.synonym,
                    earlier.synonym
                );
            }
        }
        let position = |synonym: &str| entries.iter().position(|entry| entry.synonym == synonym);
        assert!(position("HEMOGLOBINA GLICADA") < position("HEMOGLOBINA"));
        assert!(position("VLDL - COLESTEROL") < position("LDL"));
    }

    #[test]
    fn synonyms_are_unique_and_uppercase() {
        let mut seen = HashSet::new();
        for entry in default_dictionary().iter() {
            assert!(seen.insert(entry.synonym), "duplicate synonym {}", entry.synonym);
            assert_eq!(entry.synonym, entry.synonym.to_uppercase());
        }
    }

    #[test]
    fn non_hdl_is_suppressed_before_hdl() {
        let dictionary = default_dictionary();
        let position = |synonym: &str| {
            dictionary
                .iter()
                .position(|entry| entry.synonym == synonym)
                .unwrap()
        };
        assert!(position("COLESTEROL NÃO-HDL") < position("HDL"));
        assert!(dictionary.get("colesterol não-hdl").unwrap().is_suppressed());
        assert_eq!(dictionary.get("hdl").unwrap().abbreviation(), Some("HDL"));
    }

    #[test]
    fn ties_break_alphabetically() {
        let dictionary = ExamDictionary::new([
            ExamDefinition::new("TGP", "TGP", Category::General, None),
            ExamDefinition::new("ALT", "TGP", Category::General, None),
            ExamDefinition::new("GAMA GT", "GGT", Category::General, None),
        ]);
        let order: Vec<&str> = dictionary.iter().map(|entry| entry.synonym).collect();
        assert_eq!(order, vec!["GAMA GT", "ALT", "TGP"]);
    }

    #[test]
    fn category_lookup() {
        let dictionary = default_dictionary();
        assert_eq!(dictionary.category_of("Na"), Some(Category::Renal));
        assert_eq!(dictionary.category_of("HepC"), Some(Category::Serology));
        assert_eq!(dictionary.category_of("Nope"), None);
    }

    #[test]
    fn unitless_entries_keep_their_category_reading() {
        let dictionary = default_dictionary();
        let genexpert = dictionary.get("GENEXPERT").expect("GENEXPERT entry");
        assert_eq!(genexpert.unit, None);
        assert_eq!(genexpert.category, Category::CerebrospinalFluid);
        assert!(!genexpert.category.is_qualitative());
        let serology = dictionary
            .iter()
            .find(|entry| entry.category == Category::Serology)
            .expect("serology entry");
        assert!(serology.category.is_qualitative());
    }
}
