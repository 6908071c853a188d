use folio_core::{
    default_projects, JsonFileProjectRepository, ProjectDraft, ProjectRepository, ProjectService,
    ProjectServiceError,
};
use std::collections::HashSet;
use std::sync::Arc;
use tempfile::tempdir;

fn draft(title: &str, description: &str) -> ProjectDraft {
    ProjectDraft::new(title, description)
}

#[test]
fn list_on_missing_file_seeds_and_persists_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data").join("projects.json");
    let service = ProjectService::new(JsonFileProjectRepository::new(&path));

    let listed = service.list().unwrap();
    assert_eq!(listed, default_projects());
    assert!(path.exists());

    let on_disk: Vec<folio_core::Project> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, default_projects());
}

#[test]
fn list_on_corrupt_file_replaces_it_with_seed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("projects.json");
    std::fs::write(&path, "{ not json").unwrap();
    let service = ProjectService::new(JsonFileProjectRepository::new(&path));

    assert_eq!(service.list().unwrap(), default_projects());
    let rewritten = std::fs::read_to_string(&path).unwrap();
    assert!(rewritten.trim_start().starts_with('['));
}

#[test]
fn create_preserves_fields_and_assigns_unique_ids() {
    let dir = tempdir().unwrap();
    let service = ProjectService::new(JsonFileProjectRepository::new(
        dir.path().join("projects.json"),
    ));

    let mut input = draft("Compiler", "A toy compiler");
    input.link = Some("https://example.com/compiler".to_string());
    input.technologies = vec!["Rust".to_string(), "LLVM".to_string()];
    input.date = Some("2025".to_string());

    let first = service.create(input.clone()).unwrap();
    let second = service.create(input.clone()).unwrap();

    assert!(!first.id.is_empty());
    assert_ne!(first.id, second.id);
    assert_eq!(first.to_draft(), input);

    let listed = service.list().unwrap();
    let seed_len = default_projects().len();
    assert_eq!(listed.len(), seed_len + 2);
    assert_eq!(listed[seed_len], first);
    assert_eq!(listed[seed_len + 1], second);
}

#[test]
fn replace_keeps_id_and_overwrites_every_other_field() {
    let dir = tempdir().unwrap();
    let service = ProjectService::new(JsonFileProjectRepository::new(
        dir.path().join("projects.json"),
    ));
    let mut original = draft("Old", "old description");
    original.link = Some("https://old.example".to_string());
    original.technologies = vec!["Go".to_string()];
    let created = service.create(original).unwrap();

    let replacement = draft("New", "new description");
    let updated = service.replace(&created.id, replacement.clone()).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.to_draft(), replacement);
    assert_eq!(updated.link, None);
    assert!(updated.technologies.is_empty());

    let listed = service.list().unwrap();
    let position = listed.iter().position(|p| p.id == created.id).unwrap();
    assert_eq!(position, default_projects().len());
    assert_eq!(listed[position], updated);
}

#[test]
fn replace_unknown_id_is_not_found_and_leaves_file_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("projects.json");
    let service = ProjectService::new(JsonFileProjectRepository::new(&path));
    service.list().unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let err = service
        .replace("nonexistent", draft("A", "d"))
        .expect_err("unknown id must fail");
    assert!(matches!(err, ProjectServiceError::NotFound(ref id) if id == "nonexistent"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn remove_shrinks_by_one_and_unknown_id_is_not_found() {
    let dir = tempdir().unwrap();
    let service = ProjectService::new(JsonFileProjectRepository::new(
        dir.path().join("projects.json"),
    ));
    let before = service.list().unwrap();
    let target = before[1].id.clone();

    service.remove(&target).unwrap();
    let after = service.list().unwrap();
    assert_eq!(after.len(), before.len() - 1);
    assert!(after.iter().all(|p| p.id != target));
    assert_eq!(after[0], before[0]);

    let err = service.remove(&target).expect_err("second remove must fail");
    assert!(matches!(err, ProjectServiceError::NotFound(_)));
    assert_eq!(service.list().unwrap(), after);
}

#[test]
fn lifecycle_from_empty_collection() {
    let dir = tempdir().unwrap();
    let repo = JsonFileProjectRepository::new(dir.path().join("projects.json"));
    repo.save_all(&[]).unwrap();
    let service = ProjectService::new(repo);

    assert!(service.list().unwrap().is_empty());

    let created = service.create(draft("A", "d")).unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(service.list().unwrap(), vec![created.clone()]);

    service.remove(&created.id).unwrap();
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn written_collection_reads_back_identically() {
    let dir = tempdir().unwrap();
    let repo = JsonFileProjectRepository::new(dir.path().join("projects.json"));
    let mut projects = default_projects();
    projects.reverse();
    projects[0].technologies.push("Zig".to_string());

    repo.save_all(&projects).unwrap();
    assert_eq!(repo.load_all().unwrap(), projects);
}

#[test]
fn concurrent_creates_never_lose_updates() {
    let dir = tempdir().unwrap();
    let repo = JsonFileProjectRepository::new(dir.path().join("projects.json"));
    repo.save_all(&[]).unwrap();
    let service = Arc::new(ProjectService::new(repo));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let service = Arc::clone(&service);
            std::thread::spawn(move || {
                for n in 0..5 {
                    service
                        .create(draft(&format!("w{worker}-{n}"), "concurrent"))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let listed = service.list().unwrap();
    assert_eq!(listed.len(), 40);
    let ids: HashSet<_> = listed.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids.len(), 40);
}

#[cfg(unix)]
#[test]
fn unreadable_storage_is_reported_not_seeded() {
    let dir = tempdir().unwrap();
    // A directory at the file path cannot be read as a file.
    let path = dir.path().join("projects.json");
    std::fs::create_dir(&path).unwrap();
    let service = ProjectService::new(JsonFileProjectRepository::new(&path));

    let err = service.list().expect_err("directory is not a readable file");
    assert!(matches!(err, ProjectServiceError::Storage(_)));
    assert!(path.is_dir());
}
