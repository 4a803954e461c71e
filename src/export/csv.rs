use crate::error::ExportError;
use crate::export::MatchRow;
use std::fs::File;
use std::path::Path;

pub fn export_csv<P: AsRef<Path>>(rows: &[MatchRow], path: P) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(["Model", "Element ID", "Global ID", "Category", "Name", "Storey"])?;

    for row in rows {
        writer.write_record([
            &row.model,
            &row.element_id.to_string(),
            &row.global_id,
            &row.category,
            &row.name,
            &row.storey,
        ])?;
    }

    writer.flush().map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(())
}
