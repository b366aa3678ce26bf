use crate::context::{Bucket, StoreContext};
use crate::rx::{Medicine, Patient, RxFile};
use tempfile::TempDir;

/// Create an initialized store in a temp directory.
pub(crate) fn create_test_store() -> (TempDir, StoreContext) {
    let temp_dir = TempDir::new().unwrap();
    let ctx = StoreContext::resolve_from(temp_dir.path()).unwrap();

    for &bucket in Bucket::all() {
        std::fs::create_dir_all(ctx.bucket_path(bucket)).unwrap();
    }
    std::fs::create_dir_all(ctx.events_dir()).unwrap();

    (temp_dir, ctx)
}

/// Write a minimal valid record into a bucket and return its path.
pub(crate) fn write_sample_rx(
    ctx: &StoreContext,
    bucket: Bucket,
    id: &str,
) -> std::path::PathBuf {
    let mut rx = RxFile::new_draft(id, "Dr. Test");
    rx.frontmatter.patient = Patient {
        id: "patient-1".to_string(),
        age: Some(34),
        ..Default::default()
    };
    rx.frontmatter.medicines = vec![Medicine {
        name: "Paracetamol".to_string(),
        dosage: "500mg".to_string(),
        frequency: "1-0-1".to_string(),
        duration: "5 days".to_string(),
        instructions: None,
    }];

    let path = ctx.bucket_path(bucket).join(format!("{}.md", id));
    rx.save(&path).unwrap();
    path
}

/// Write a record with the given medicines into a bucket.
pub(crate) fn write_rx_with_medicines(
    ctx: &StoreContext,
    bucket: Bucket,
    id: &str,
    patient: Patient,
    medicines: Vec<Medicine>,
) -> std::path::PathBuf {
    let mut rx = RxFile::new_draft(id, "Dr. Test");
    rx.frontmatter.patient = patient;
    rx.frontmatter.medicines = medicines;

    let path = ctx.bucket_path(bucket).join(format!("{}.md", id));
    rx.save(&path).unwrap();
    path
}

/// Shorthand for a named medicine with a dosage.
pub(crate) fn med(name: &str, dosage: &str) -> Medicine {
    Medicine {
        name: name.to_string(),
        dosage: dosage.to_string(),
        ..Default::default()
    }
}
