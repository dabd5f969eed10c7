// SPDX-License-Identifier: MPL-2.0
//! Executes batch writes against a [`DestinationWriter`].

use super::image_store::Image;
use super::state::BatchJob;
use crate::destination::{DestinationWriter, FolderHandle, RootHandle};
use crate::error::DestinationError;
use futures_util::future::join_all;
use std::collections::HashSet;
use std::path::Path;

/// Summary of a fully successful batch write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Number of files written.
    pub written: usize,
    /// Human-readable location of the folder the batch went to.
    pub location: String,
}

/// Completion of a [`BatchJob`].
///
/// `root` is the destination root the job wrote through, when one was bound.
/// The caller keeps it so later jobs reuse the same root.
#[derive(Debug, Clone)]
pub struct JobOutcome<R> {
    pub job: BatchJob,
    pub root: Option<R>,
    pub result: Result<WriteReport, DestinationError>,
}

/// Writes every image of `job.batch` into the job's subfolder.
///
/// When `root` is `None` the writer is asked to acquire one first. Files are
/// written concurrently and the result is only reported once all of them have
/// settled. Images sharing a file name (possible after a recursive scan) are
/// stored under distinct names, see [`target_names`].
pub async fn run_job<W>(writer: W, root: Option<W::Root>, job: BatchJob) -> JobOutcome<W::Root>
where
    W: DestinationWriter,
{
    let root = match root {
        Some(root) => root,
        None => match writer.acquire_root(job.kind.destination()).await {
            Ok(root) => root,
            Err(err) => {
                log::info!("No {:?} destination bound: {err}", job.kind.destination());
                return JobOutcome {
                    job,
                    root: None,
                    result: Err(err),
                };
            }
        },
    };

    let result = write_batch(&root, &job).await;
    match &result {
        Ok(report) => log::info!(
            "Wrote {} file(s) of batch {} to {}",
            report.written,
            job.batch_index,
            report.location
        ),
        Err(err) => log::warn!("Batch {} write failed: {err}", job.batch_index),
    }

    JobOutcome {
        job,
        root: Some(root),
        result,
    }
}

async fn write_batch<R: RootHandle>(
    root: &R,
    job: &BatchJob,
) -> Result<WriteReport, DestinationError> {
    let folder = root.get_or_create_subfolder(&job.folder_name).await?;

    let names = target_names(job.batch.images());
    let writes = job.batch.iter().zip(&names).map(|(image, name)| {
        let folder = &folder;
        async move {
            let bytes = image
                .fetch_bytes()
                .await
                .map_err(|e| DestinationError::WriteFailed {
                    file_name: name.clone(),
                    message: e.to_string(),
                })?;
            folder.write(name, bytes).await
        }
    });
    let results = join_all(writes).await;

    let total = results.len();
    let mut errors = results.into_iter().filter_map(Result::err);
    let Some(first_error) = errors.next() else {
        return Ok(WriteReport {
            written: total,
            location: format!("{}/{}", root.location(), job.folder_name),
        });
    };

    let failed = 1 + errors.count();
    if failed == total {
        return Err(first_error);
    }
    Err(DestinationError::PartialWrite {
        written: total - failed,
        total,
        first_error: first_error.to_string(),
    })
}

/// File name each image of a batch is written under.
///
/// The first image keeps its name; a later image whose name is already taken
/// gets the lowest free numeric suffix (`IMG_0001_2.png`), so no two writes of
/// one batch target the same file.
fn target_names(images: &[Image]) -> Vec<String> {
    let mut taken = HashSet::new();
    images
        .iter()
        .map(|image| {
            let name = image.file_name();
            let mut candidate = name.to_string();
            let mut n = 2;
            while !taken.insert(candidate.clone()) {
                candidate = with_suffix(name, n);
                n += 1;
            }
            candidate
        })
        .collect()
}

fn with_suffix(name: &str, n: usize) -> String {
    let path = Path::new(name);
    match (
        path.file_stem().and_then(|s| s.to_str()),
        path.extension().and_then(|e| e.to_str()),
    ) {
        (Some(stem), Some(ext)) => format!("{stem}_{n}.{ext}"),
        _ => format!("{name}_{n}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::memory::MemoryWriter;
    use crate::destination::Destination;
    use crate::review::image_store::ImageSequence;
    use crate::review::state::{Command, Effect, ReviewState};
    use crate::test_utils::{create_png_files, PNG_BYTES};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn job_for(state: &ReviewState, command: Command) -> BatchJob {
        match state.dispatch(command).1 {
            Effect::Write(job) => job,
            other => panic!("expected a write, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn writes_batch_into_named_subfolder() {
        let dir = tempdir().expect("failed to create temp dir");
        let sequence = ImageSequence::from_files(create_png_files(dir.path(), 10));
        let state = ReviewState::new().load(&sequence).0;
        let state = state.dispatch(Command::Select(9)).0;
        let writer = MemoryWriter::new();

        let outcome = run_job(writer.clone(), None, job_for(&state, Command::Accept)).await;

        assert_eq!(
            outcome.result.as_ref().map(|r| r.written),
            Ok(2),
            "{:?}",
            outcome.result
        );
        assert!(outcome.root.is_some());
        assert_eq!(
            writer.files(Destination::Accept, "Batch_1"),
            vec!["img_08.png".to_string(), "img_09.png".to_string()]
        );
        assert_eq!(
            writer.read(Destination::Accept, "Batch_1", "img_09.png"),
            Some(std::fs::read(dir.path().join("img_09.png")).expect("read failed"))
        );
    }

    #[tokio::test]
    async fn bound_root_is_reused() {
        let dir = tempdir().expect("failed to create temp dir");
        let sequence = ImageSequence::from_files(create_png_files(dir.path(), 3));
        let state = ReviewState::new().load(&sequence).0;
        let writer = MemoryWriter::new();

        let first = run_job(writer.clone(), None, job_for(&state, Command::Save)).await;
        let second = run_job(writer.clone(), first.root, job_for(&state, Command::Save)).await;

        assert!(second.result.is_ok());
        assert_eq!(writer.acquisitions(), 1);
    }

    #[tokio::test]
    async fn cancelled_picker_leaves_root_unbound() {
        let dir = tempdir().expect("failed to create temp dir");
        let sequence = ImageSequence::from_files(create_png_files(dir.path(), 3));
        let state = ReviewState::new().load(&sequence).0;
        let writer = MemoryWriter::new();
        writer.cancel_next_acquire();

        let outcome = run_job(writer.clone(), None, job_for(&state, Command::Reject)).await;

        assert_eq!(outcome.result, Err(DestinationError::Cancelled));
        assert!(outcome.root.is_none());
        assert!(writer.files(Destination::Reject, "Reject").is_empty());
    }

    #[tokio::test]
    async fn partial_failure_reports_counts() {
        let dir = tempdir().expect("failed to create temp dir");
        let sequence = ImageSequence::from_files(create_png_files(dir.path(), 8));
        let state = ReviewState::new().load(&sequence).0;
        let writer = MemoryWriter::new();
        writer.fail_writes_of("img_03.png");

        let outcome = run_job(writer.clone(), None, job_for(&state, Command::Accept)).await;

        match outcome.result {
            Err(DestinationError::PartialWrite { written, total, .. }) => {
                assert_eq!((written, total), (7, 8));
            }
            other => panic!("expected a partial write, got {other:?}"),
        }
        assert!(outcome.root.is_some());
    }

    #[tokio::test]
    async fn single_failing_file_is_a_write_failure() {
        let dir = tempdir().expect("failed to create temp dir");
        let sequence = ImageSequence::from_files(create_png_files(dir.path(), 1));
        let state = ReviewState::new().load(&sequence).0;
        let writer = MemoryWriter::new();
        writer.fail_writes_of("img_00.png");

        let outcome = run_job(writer, None, job_for(&state, Command::Accept)).await;

        assert!(matches!(
            outcome.result,
            Err(DestinationError::WriteFailed { .. })
        ));
    }

    #[tokio::test]
    async fn vanished_source_file_fails_the_write() {
        let dir = tempdir().expect("failed to create temp dir");
        let paths = create_png_files(dir.path(), 2);
        let sequence = ImageSequence::from_files(paths.clone());
        let state = ReviewState::new().load(&sequence).0;
        std::fs::remove_file(&paths[1]).expect("failed to remove file");

        let outcome = run_job(MemoryWriter::new(), None, job_for(&state, Command::Accept)).await;

        assert!(matches!(
            outcome.result,
            Err(DestinationError::PartialWrite {
                written: 1,
                total: 2,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn same_named_images_from_subfolders_are_all_stored() {
        let dir = tempdir().expect("failed to create temp dir");
        for (sub, marker) in [("a", b"#a"), ("b", b"#b")] {
            fs::create_dir(dir.path().join(sub)).expect("failed to create subfolder");
            let mut bytes = PNG_BYTES.to_vec();
            bytes.extend_from_slice(marker);
            fs::write(dir.path().join(sub).join("IMG_0001.png"), bytes)
                .expect("failed to write test image");
        }
        let sequence = ImageSequence::scan_folder(dir.path(), true).expect("scan failed");
        assert_eq!(sequence.len(), 2);
        let state = ReviewState::new().load(&sequence).0;
        let writer = MemoryWriter::new();

        let outcome = run_job(writer.clone(), None, job_for(&state, Command::Accept)).await;

        assert_eq!(outcome.result.as_ref().map(|r| r.written), Ok(2));
        assert_eq!(
            writer.files(Destination::Accept, "Batch_1"),
            vec!["IMG_0001.png".to_string(), "IMG_0001_2.png".to_string()]
        );
        let stored = |name| {
            writer
                .read(Destination::Accept, "Batch_1", name)
                .expect("file stored")
        };
        assert!(stored("IMG_0001.png").ends_with(b"#a"));
        assert!(stored("IMG_0001_2.png").ends_with(b"#b"));
    }

    #[test]
    fn duplicate_names_get_the_lowest_free_suffix() {
        let dir = tempdir().expect("failed to create temp dir");
        let paths: Vec<PathBuf> = ["x", "y", "z", "w", "v"]
            .iter()
            .zip(["a.png", "a.png", "a_2.png", "notes", "notes"])
            .map(|(sub, name)| {
                let folder = dir.path().join(sub);
                fs::create_dir(&folder).expect("failed to create subfolder");
                let path = folder.join(name);
                fs::write(&path, PNG_BYTES).expect("failed to write test image");
                path
            })
            .collect();
        let sequence = ImageSequence::from_files(paths);
        let images: Vec<Image> = sequence.iter().cloned().collect();

        assert_eq!(
            target_names(&images),
            vec!["a.png", "a_2.png", "a_2_2.png", "notes", "notes_2"]
        );
    }
}
