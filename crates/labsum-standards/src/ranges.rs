//! Adult reference intervals keyed by table label.
//!
//! A label missing from this table means the abnormality of its values is
//! unknown, not that every value is normal.

use std::collections::HashMap;
use std::sync::LazyLock;

use labsum_model::ReferenceRange;

const fn between(lower: f64, upper: f64) -> ReferenceRange {
    ReferenceRange::between(lower, upper)
}

const fn at_most(upper: f64) -> ReferenceRange {
    ReferenceRange::at_most(upper)
}

const fn at_least(lower: f64) -> ReferenceRange {
    ReferenceRange::at_least(lower)
}

static RANGES: &[(&str, ReferenceRange)] = &[
    // Blood count
    ("Hb", between(12.0, 17.5)),
    ("Ht", between(36.0, 52.0)),
    ("VCM", between(80.0, 100.0)),
    ("Leuco", between(4.0, 11.0)),
    ("Plaq", between(150.0, 450.0)),
    // Renal and electrolytes
    ("Cr", between(0.6, 1.3)),
    ("Ur", between(15.0, 45.0)),
    ("Na", between(136.0, 145.0)),
    ("K", between(3.5, 5.1)),
    ("Cl", between(98.0, 107.0)),
    ("Ca", between(8.6, 10.3)),
    ("CaI", between(4.6, 5.3)),
    ("P", between(2.5, 4.5)),
    ("Mg", between(1.6, 2.6)),
    // Liver, pancreas, coagulation
    ("TGO", at_most(40.0)),
    ("TGP", at_most(41.0)),
    ("BT", between(0.2, 1.2)),
    ("BD", at_most(0.3)),
    ("PT", between(6.4, 8.3)),
    ("ALB", between(3.5, 5.2)),
    ("FA", between(40.0, 129.0)),
    ("GGT", at_most(60.0)),
    ("AMIL", between(28.0, 100.0)),
    ("LIP", between(13.0, 60.0)),
    ("INR", between(0.8, 1.2)),
    ("R", between(0.8, 1.25)),
    // Venous gas
    ("GV.pH", between(7.32, 7.43)),
    ("GV.pCO2", between(38.0, 50.0)),
    ("GV.BIC", between(22.0, 29.0)),
    ("GV.LAC", at_most(2.0)),
    // Arterial gas
    ("GA.pH", between(7.35, 7.45)),
    ("GA.pO2", between(80.0, 100.0)),
    ("GA.pCO2", between(35.0, 45.0)),
    ("GA.BIC", between(22.0, 26.0)),
    ("GA.LAC", at_most(2.0)),
    ("GA.SO2", at_least(95.0)),
    // Metabolic
    ("Glic", between(70.0, 99.0)),
    ("HbGlic", at_most(5.7)),
    ("HDL", at_least(40.0)),
    ("LDL", at_most(130.0)),
    ("VLDL", at_most(30.0)),
    ("ColT", at_most(190.0)),
    ("Trig", at_most(150.0)),
    ("TSH", between(0.4, 4.5)),
    ("T4L", between(0.9, 1.8)),
    ("B12", between(200.0, 900.0)),
    ("AF", at_least(3.9)),
    ("VitD", at_least(20.0)),
    ("PTH", between(15.0, 65.0)),
    ("CPK", at_most(190.0)),
    ("Fe", between(60.0, 170.0)),
    ("Ferritina", between(30.0, 400.0)),
    ("CTLF", between(250.0, 450.0)),
    ("STf", between(20.0, 50.0)),
    ("DHL", at_most(250.0)),
    // Inflammatory and complement
    ("PCR", at_most(5.0)),
    ("VHS", at_most(20.0)),
    ("C3", between(90.0, 180.0)),
    ("C4", between(10.0, 40.0)),
    // Thrombophilia
    ("DD", at_most(500.0)),
    ("Fibrinogênio", between(200.0, 400.0)),
    // Drug levels (therapeutic windows)
    ("VPA", between(50.0, 100.0)),
    ("PHT", between(10.0, 20.0)),
    ("CBZ", between(4.0, 12.0)),
    ("PB", between(15.0, 40.0)),
    ("LEV", between(12.0, 46.0)),
    ("LTG", between(3.0, 15.0)),
    // Cardiac
    ("Tropo-T", at_most(14.0)),
    ("NT-proBNP", at_most(125.0)),
    // Cerebrospinal fluid
    ("LCR.Prot", between(15.0, 45.0)),
    ("LCR.Glic", between(40.0, 70.0)),
    ("LCR.Lac", at_most(2.8)),
    ("LCR.ADA", at_most(9.0)),
    ("LCR.Cel", at_most(5.0)),
    ("LCR.Hem", at_most(0.0)),
    // Urinalysis
    ("U.Leuco", at_most(10.0)),
    ("U.Hem", at_most(5.0)),
    ("U.pH", between(5.0, 8.0)),
    ("U.Dens", between(1.005, 1.030)),
];

static RANGE_INDEX: LazyLock<HashMap<&'static str, ReferenceRange>> =
    LazyLock::new(|| RANGES.iter().copied().collect());

/// Reference interval for a table label (`Na`, `GA.pH`, `LCR.Glic`).
pub fn reference_range(label: &str) -> Option<ReferenceRange> {
    RANGE_INDEX.get(label).copied()
}

/// All known labels with their intervals, in declaration order.
pub fn reference_ranges() -> &'static [(&'static str, ReferenceRange)] {
    RANGES
}
