//! Tests for the end-to-end parse of report dumps.

use chrono::NaiveDate;
use labsum_core::{LabSession, ParseOutcome, is_abnormal, parse};
use labsum_model::{Category, DateOrder, GasKind, GasParam};

const ADMISSION: &str = include_str!("fixtures/internacao.txt");

fn admission() -> ParseOutcome {
    parse(ADMISSION)
}

#[test]
fn flat_summary() {
    insta::assert_snapshot!(admission().summary(), @r"
    > LABORATORIAIS
    - Gerais: Hb 12.5 | Ht 37.9 | Leuco 8.20 (N 70 / Ly 20) | Plaq 250
    - Renal: Na 147
    - Gasometria: GA.pH 7.41
    - Sorologias: HepC NR

    > LCR
    - LCR: Cel 3 | Prot 40 | Glic 60 | Painel viral pendente, parcial: HSV-1, HSV-2, VZV, CMV neg
    ");
}

#[test]
fn grouped_by_date() {
    insta::assert_snapshot!(admission().by_date(false), @r"
    > LABORATORIAIS
    - Gerais:
      11/03/2025: Hb 12.5 | Ht 37.9 | Leuco 8.20 | Plaq 250
    - Renal:
      10/03/2025: Na 138
      11/03/2025: Na 147
    - Gasometria:
      10/03/2025: GA.pH 7.30 | GA.pO2 80 | GA.pCO2 50.0
      11/03/2025: GA.pH 7.41
    - Sorologias:
      11/03/2025: HepC NR

    > LCR
    - LCR:
      12/03/2025: Cel 3 | Prot 40 | Glic 60
      Painel viral pendente, parcial: HSV-1, HSV-2, VZV, CMV neg
    ");
}

#[test]
fn table_export() {
    let table = admission().table(DateOrder::Ascending);
    assert_eq!(
        table.to_tsv(),
        "Exame\t10/03\t11/03\t12/03\n\
         Hb\t\t12.5\t\n\
         Ht\t\t37.9\t\n\
         Leuco\t\t8.20\t\n\
         Plaq\t\t250\t\n\
         Na\t138\t147\t\n\
         GA.pH\t7.30\t7.41\t\n\
         GA.pO2\t80\t\t\n\
         GA.pCO2\t50.0\t\t\n\
         HepC\t\tNR\t\n\
         LCR.Cel\t\t\t3\n\
         LCR.Prot\t\t\t40\n\
         LCR.Glic\t\t\t60\n"
    );
    assert_eq!(table.triples().len(), 14);
}

#[test]
fn descending_table_puts_latest_day_first() {
    let table = admission().table(DateOrder::Descending);
    assert_eq!(table.day_labels(), vec!["12/03", "11/03", "10/03"]);
}

#[test]
fn trend_values_never_become_results() {
    let outcome = admission();
    let days: Vec<NaiveDate> = outcome.table(DateOrder::Ascending).days;
    assert_eq!(days.first(), NaiveDate::from_ymd_opt(2025, 3, 10).as_ref());
    assert!(!outcome.by_date(false).contains("135"));
}

#[test]
fn newer_arterial_gas_replaces_the_whole_snapshot() {
    let outcome = admission();
    let latest = outcome
        .results()
        .gases
        .latest(GasKind::Arterial)
        .expect("arterial snapshot");
    assert_eq!(latest.get(GasParam::Ph), Some("7.41"));
    assert_eq!(latest.get(GasParam::Pco2), None);
    assert_eq!(outcome.results().gases.history().len(), 2);
}

#[test]
fn non_hdl_cholesterol_is_not_hdl() {
    let outcome = admission();
    assert!(outcome.results().store.get(Category::Metabolic, "HDL").is_none());
    assert_eq!(outcome.stats().empty_blocks, 1);
}

#[test]
fn statistics() {
    let stats = admission().stats().clone();
    assert_eq!(stats.blocks, 10);
    assert_eq!(stats.dropped_invalidated, 1);
    assert_eq!(stats.dropped_missing_collection_time, 0);
    assert_eq!(stats.records, 14);
    assert_eq!(stats.distinct_exams, 12);
    assert_eq!(
        stats.most_recent,
        NaiveDate::from_ymd_opt(2025, 3, 12).and_then(|day| day.and_hms_opt(14, 0, 0))
    );
}

#[test]
fn windows_line_endings_parse_the_same() {
    let crlf = ADMISSION.replace('\n', "\r\n");
    assert_eq!(parse(&crlf).summary(), admission().summary());
}

#[test]
fn complete_negative_viral_panel() {
    let text = "\
20/03/2025 10:00:00 PAINEL DE MENINGITE/ENCEFALITE - LCR
Coletado em: 20/03/2025 08:00
Herpes simples vírus 1 (HSV-1) Não detectado
Herpes simples vírus 2 (HSV-2) Não detectado
Vírus varicela-zoster (VZV) Não detectado
Citomegalovírus (CMV) Não detectado
Vírus Epstein-Barr (EBV) Não detectado
Herpesvírus humano 6 (HHV-6) Não detectado
Enterovírus Não detectado
Parechovírus Não detectado
Vírus JC Não detectado
Adenovírus Não detectado
";
    assert_eq!(
        parse(text).summary(),
        "> LABORATORIAIS\n\n> LCR\n- LCR: Painel viral negativo"
    );
}

#[test]
fn reactive_serology_after_non_reactive_wording_check() {
    let text = "\
05/04/2025 09:00:00 SOROLOGIA PARA HEPATITE C - SANGUE
Coletado em: 05/04/2025 07:00
Anti-HCV
Resultado: Reagente
";
    assert!(parse(text).summary().contains("HepC R"));
}

#[test]
fn abnormal_flags_follow_reference_ranges() {
    let table = admission().table(DateOrder::Ascending);
    let flagged: Vec<String> = table
        .triples()
        .into_iter()
        .filter(|(_, label, value)| is_abnormal(label, value))
        .map(|(day, label, value)| format!("{} {label} {value}", day.format("%d/%m")))
        .collect();
    assert_eq!(
        flagged,
        vec!["10/03 GA.pH 7.30", "10/03 GA.pCO2 50.0", "11/03 Na 147"]
    );
}

#[test]
fn session_keeps_the_last_parse() {
    let mut session = LabSession::new();
    let summary = session.parse(ADMISSION);
    assert_eq!(summary, admission().summary());
    assert_eq!(
        session.table_data(DateOrder::Ascending).unwrap(),
        admission().table(DateOrder::Ascending)
    );
}

#[test]
fn incomplete_panel_with_positive_lists_tested_negatives() {
    let text = "\
21/03/2025 10:00:00 PAINEL DE MENINGITE/ENCEFALITE - LCR
Coletado em: 21/03/2025 08:00
Herpes simples vírus 1 (HSV-1) Não detectado
Enterovírus Detectado
";
    assert_eq!(
        parse(text).summary(),
        "> LABORATORIAIS\n\n> LCR\n- LCR: Painel viral: Enterovírus detectado, pendente, parcial: HSV-1 neg"
    );
}

#[test]
fn impossible_collection_date_is_counted_apart() {
    let text = "\
01/03/2025 10:00:00 SÓDIO - SANGUE
Coletado em: 31/02/2025 10:00
SÓDIO 140 mEq/L
";
    let outcome = parse(text);
    assert!(outcome.is_empty());
    assert_eq!(outcome.stats().dropped_invalid_collection_time, 1);
    assert_eq!(outcome.stats().dropped_missing_collection_time, 0);
}
