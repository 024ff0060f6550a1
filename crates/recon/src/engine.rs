use crate::config::ReconConfig;
use crate::lookup::build_lookup;
use crate::model::{
    ContainerKey, Lookup, LookupEntry, ReconInput, ReconMeta, ReconResult, ReconSummary,
    Reconciliation, RowRecord, IN_CONTAINER, IN_DATATYPE, IN_FILE, IN_NAME, IN_SHEET,
    OUT_CONTAINER, OUT_DATATYPE, OUT_FILE, OUT_NAME, OUT_SHEET,
};

/// Run reconciliation per config: build one lookup per container table (in
/// the order given), then join the selections against them.
pub fn run(config: &ReconConfig, input: ReconInput) -> ReconResult {
    let lookups: Vec<Lookup> = input
        .containers
        .iter()
        .map(|table| build_lookup(&table.rows, &config.columns, &table.file))
        .collect();

    let lookup_entries = lookups.iter().map(Lookup::len).sum();
    let reconciliation = reconcile(&lookups, input.selections, &config.unknown);

    ReconResult {
        meta: ReconMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            lookup_entries,
        },
        reconciliation,
    }
}

/// First entry for `key`, scanning lookups in order.
pub fn resolve<'a>(lookups: &'a [Lookup], key: &ContainerKey) -> Option<&'a LookupEntry> {
    lookups.iter().find_map(|lookup| lookup.get(key))
}

/// Annotate every selection row with the resolved datatype, file and sheet of
/// its input and output field. Rows whose two datatypes differ are also
/// collected into `mismatches`. Both lists keep input order.
pub fn reconcile(lookups: &[Lookup], selections: Vec<RowRecord>, unknown: &str) -> Reconciliation {
    let fallback = LookupEntry::unknown(unknown);
    let mut rows = Vec::with_capacity(selections.len());
    let mut mismatches = Vec::new();
    let mut summary = ReconSummary::default();

    for mut row in selections {
        let in_key = ContainerKey::new(row.text(IN_NAME), row.text(IN_CONTAINER));
        let out_key = ContainerKey::new(row.text(OUT_NAME), row.text(OUT_CONTAINER));

        let in_info = resolve(lookups, &in_key).unwrap_or_else(|| {
            summary.unresolved_inputs += 1;
            log::debug!("No datatype found for input {in_key}");
            &fallback
        });
        let out_info = resolve(lookups, &out_key).unwrap_or_else(|| {
            summary.unresolved_outputs += 1;
            log::debug!("No datatype found for output {out_key}");
            &fallback
        });

        row.set(IN_DATATYPE, in_info.datatype.as_str());
        row.set(OUT_DATATYPE, out_info.datatype.as_str());
        row.set(IN_FILE, in_info.file.as_str());
        row.set(IN_SHEET, in_info.sheet.as_str());
        row.set(OUT_FILE, out_info.file.as_str());
        row.set(OUT_SHEET, out_info.sheet.as_str());

        if in_info.datatype != out_info.datatype {
            mismatches.push(row.clone());
        }
        rows.push(row);
    }

    summary.selections = rows.len();
    summary.mismatches = mismatches.len();

    log::info!(
        "Processed {} selections, found {} mismatches",
        summary.selections,
        summary.mismatches
    );

    Reconciliation {
        rows,
        mismatches,
        summary,
    }
}
