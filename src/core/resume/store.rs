//! External collaborators: `BlobStore` and `MetadataStore`
//!
//! Both are trait objects the pipeline is generic over, following the `AI`
//! trait convention used elsewhere in this pack. The filesystem/in-memory
//! implementations exist so the pipeline is runnable and testable end to
//! end; they are not the system of record.

use crate::core::resume::types::{Certification, EducationEntry, ExperienceEntry, ParsedRecord};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

/// Object storage for resume bytes and profile pictures.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(&self, bucket: &str, path: &str, bytes: &[u8], content_type: &str) -> anyhow::Result<()>;
    async fn remove(&self, bucket: &str, paths: &[String]) -> anyhow::Result<()>;
    async fn signed_url(&self, bucket: &str, path: &str, ttl_secs: u64) -> anyhow::Result<String>;
    async fn public_url(&self, bucket: &str, path: &str) -> anyhow::Result<String>;
}

/// Row persisted alongside a subject's structured profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub summary: Option<String>,
    pub address: Option<String>,
    pub graduation_year: Option<i32>,
    pub years_of_experience: i32,
    pub salary: Option<String>,
}

/// A stored resume upload, as returned to the pipeline caller.
#[derive(Debug, Clone)]
pub struct ResumeRow {
    pub id: String,
    pub subject_id: String,
    pub bucket: String,
    pub path: String,
    pub original_name: String,
    pub content_type: String,
}

/// Typed per-entity persistence for the six entity tables.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Fetch the existing profile fields for `subject_id`, if any row exists.
    async fn get_profile(&self, subject_id: &str) -> anyhow::Result<Option<ProfileFields>>;

    /// Insert a profile row if missing, then overwrite only fields that are
    /// currently empty with values from `record`.
    async fn upsert_profile_if_empty(&self, subject_id: &str, record: &ParsedRecord) -> anyhow::Result<()>;

    /// Replace all experience rows for `subject_id`.
    async fn replace_experience(&self, subject_id: &str, entries: &[ExperienceEntry]) -> anyhow::Result<()>;

    /// Replace all education rows for `subject_id`.
    async fn replace_education(&self, subject_id: &str, entries: &[EducationEntry]) -> anyhow::Result<()>;

    /// Replace all skill rows for `subject_id`.
    async fn replace_skills(&self, subject_id: &str, skills: &[String]) -> anyhow::Result<()>;

    /// Replace all certification rows for `subject_id`.
    async fn replace_certifications(&self, subject_id: &str, certifications: &[Certification]) -> anyhow::Result<()>;

    /// Record a resume upload and return its generated id.
    #[allow(clippy::too_many_arguments)]
    async fn insert_resume(
        &self,
        subject_id: &str,
        bucket: &str,
        path: &str,
        original_name: &str,
        content_type: &str,
        extracted_text: Option<&str>,
        parsed_data: Option<&str>,
    ) -> anyhow::Result<String>;

    /// Remove and return every existing resume row for `subject_id`, so the
    /// caller can clean up their blobs before writing the new upload's row.
    async fn take_resumes(&self, subject_id: &str) -> anyhow::Result<Vec<ResumeRow>>;
}

// ---------------------------------------------------------------------
// Filesystem BlobStore
// ---------------------------------------------------------------------

/// Local-directory-per-bucket blob store, adequate for development and
/// tests. A real deployment substitutes an object-storage-backed
/// implementation behind the same trait.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn bucket_path(&self, bucket: &str, path: &str) -> PathBuf {
        self.root.join(bucket).join(path)
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn upload(&self, bucket: &str, path: &str, bytes: &[u8], content_type: &str) -> anyhow::Result<()> {
        let target = self.bucket_path(bucket, path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        tracing::debug!(bucket, path, content_type, bytes = bytes.len(), "uploaded blob");
        Ok(())
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> anyhow::Result<()> {
        for path in paths {
            let target = self.bucket_path(bucket, path);
            match tokio::fs::remove_file(&target).await {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    async fn signed_url(&self, bucket: &str, path: &str, ttl_secs: u64) -> anyhow::Result<String> {
        Ok(format!("file://{}?ttl={}", self.bucket_path(bucket, path).display(), ttl_secs))
    }

    async fn public_url(&self, bucket: &str, path: &str) -> anyhow::Result<String> {
        Ok(format!("file://{}", self.bucket_path(bucket, path).display()))
    }
}

// ---------------------------------------------------------------------
// In-memory BlobStore / MetadataStore (fast unit test wiring)
// ---------------------------------------------------------------------

/// In-memory blob store for fast unit tests of the orchestrator and
/// pipeline entry, mirroring this corpus's habit of an in-memory SQLite
/// pool for test wiring.
#[derive(Default)]
pub struct InMemoryBlobStore {
    pub(crate) objects: Mutex<HashMap<(String, String), Vec<u8>>>,
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(&self, bucket: &str, path: &str, bytes: &[u8], _content_type: &str) -> anyhow::Result<()> {
        self.objects
            .lock()
            .expect("lock poisoned")
            .insert((bucket.to_string(), path.to_string()), bytes.to_vec());
        Ok(())
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> anyhow::Result<()> {
        let mut objects = self.objects.lock().expect("lock poisoned");
        for path in paths {
            objects.remove(&(bucket.to_string(), path.clone()));
        }
        Ok(())
    }

    async fn signed_url(&self, bucket: &str, path: &str, ttl_secs: u64) -> anyhow::Result<String> {
        Ok(format!("memory://{bucket}/{path}?ttl={ttl_secs}"))
    }

    async fn public_url(&self, bucket: &str, path: &str) -> anyhow::Result<String> {
        Ok(format!("memory://{bucket}/{path}"))
    }
}

#[derive(Default)]
struct MemorySubject {
    profile: ProfileFields,
    experience: Vec<ExperienceEntry>,
    education: Vec<EducationEntry>,
    skills: Vec<String>,
    certifications: Vec<Certification>,
    resumes: Vec<ResumeRow>,
}

/// In-memory metadata store for fast unit tests.
#[derive(Default)]
pub struct InMemoryMetadataStore {
    subjects: Mutex<HashMap<String, MemorySubject>>,
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn get_profile(&self, subject_id: &str) -> anyhow::Result<Option<ProfileFields>> {
        Ok(self.subjects.lock().expect("lock poisoned").get(subject_id).map(|s| s.profile.clone()))
    }

    async fn upsert_profile_if_empty(&self, subject_id: &str, record: &ParsedRecord) -> anyhow::Result<()> {
        let mut subjects = self.subjects.lock().expect("lock poisoned");
        let entry = subjects.entry(subject_id.to_string()).or_default();
        apply_if_empty(&mut entry.profile, record);
        Ok(())
    }

    async fn replace_experience(&self, subject_id: &str, entries: &[ExperienceEntry]) -> anyhow::Result<()> {
        let mut subjects = self.subjects.lock().expect("lock poisoned");
        subjects.entry(subject_id.to_string()).or_default().experience = entries.to_vec();
        Ok(())
    }

    async fn replace_education(&self, subject_id: &str, entries: &[EducationEntry]) -> anyhow::Result<()> {
        let mut subjects = self.subjects.lock().expect("lock poisoned");
        subjects.entry(subject_id.to_string()).or_default().education = entries.to_vec();
        Ok(())
    }

    async fn replace_skills(&self, subject_id: &str, skills: &[String]) -> anyhow::Result<()> {
        let mut subjects = self.subjects.lock().expect("lock poisoned");
        subjects.entry(subject_id.to_string()).or_default().skills = skills.to_vec();
        Ok(())
    }

    async fn replace_certifications(&self, subject_id: &str, certifications: &[Certification]) -> anyhow::Result<()> {
        let mut subjects = self.subjects.lock().expect("lock poisoned");
        subjects.entry(subject_id.to_string()).or_default().certifications = certifications.to_vec();
        Ok(())
    }

    async fn insert_resume(
        &self,
        subject_id: &str,
        bucket: &str,
        path: &str,
        original_name: &str,
        content_type: &str,
        _extracted_text: Option<&str>,
        _parsed_data: Option<&str>,
    ) -> anyhow::Result<String> {
        let id = Uuid::new_v4().to_string();
        let row = ResumeRow {
            id: id.clone(),
            subject_id: subject_id.to_string(),
            bucket: bucket.to_string(),
            path: path.to_string(),
            original_name: original_name.to_string(),
            content_type: content_type.to_string(),
        };
        self.subjects.lock().expect("lock poisoned").entry(subject_id.to_string()).or_default().resumes.push(row);
        Ok(id)
    }

    async fn take_resumes(&self, subject_id: &str) -> anyhow::Result<Vec<ResumeRow>> {
        let mut subjects = self.subjects.lock().expect("lock poisoned");
        Ok(subjects.entry(subject_id.to_string()).or_default().resumes.drain(..).collect())
    }
}

fn apply_if_empty(profile: &mut ProfileFields, record: &ParsedRecord) {
    if profile.summary.is_none() {
        profile.summary = record.summary.clone();
    }
    if profile.address.is_none() {
        profile.address = record.address.clone();
    }
    if profile.graduation_year.is_none() {
        profile.graduation_year = record.graduation_year;
    }
    if profile.salary.is_none() {
        profile.salary = record.salary.clone();
    }
    profile.years_of_experience = profile.years_of_experience.max(record.years_of_experience);
}

// ---------------------------------------------------------------------
// SQLite-backed MetadataStore
// ---------------------------------------------------------------------

/// SQLite-backed metadata store covering the profile/experience/education/
/// skills/certifications/resumes tables.
pub struct SqliteMetadataStore {
    pool: SqlitePool,
}

impl SqliteMetadataStore {
    /// Connect to a SQLite database at `path`, creating its parent
    /// directory and running migrations.
    pub async fn connect(path: &Path) -> Result<Self, sqlx::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
        }
        let url = format!("sqlite://{}?mode=rwc", path.display());
        let pool = SqlitePool::connect(&url).await?;
        Self::configure_pragmas(&pool).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Connect to an in-memory database (for integration tests that want
    /// real SQL semantics rather than the `InMemoryMetadataStore` stub).
    pub async fn connect_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePool::connect("sqlite::memory:").await?;
        Self::configure_pragmas(&pool).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    async fn configure_pragmas(pool: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::query("PRAGMA journal_mode = WAL").execute(pool).await.ok();
        sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;
        sqlx::query("PRAGMA busy_timeout = 5000").execute(pool).await?;
        Ok(())
    }
}

#[async_trait]
impl MetadataStore for SqliteMetadataStore {
    async fn get_profile(&self, subject_id: &str) -> anyhow::Result<Option<ProfileFields>> {
        let row = sqlx::query_as::<_, (Option<String>, Option<String>, Option<i32>, i32, Option<String>)>(
            "SELECT summary, address, graduation_year, years_of_experience, salary FROM nurse_profiles WHERE id = ?1",
        )
        .bind(subject_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(summary, address, graduation_year, years_of_experience, salary)| ProfileFields {
            summary,
            address,
            graduation_year,
            years_of_experience,
            salary,
        }))
    }

    async fn upsert_profile_if_empty(&self, subject_id: &str, record: &ParsedRecord) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO nurse_profiles (id, summary, address, graduation_year, years_of_experience, salary) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
             ON CONFLICT(id) DO UPDATE SET \
               summary = COALESCE(nurse_profiles.summary, excluded.summary), \
               address = COALESCE(nurse_profiles.address, excluded.address), \
               graduation_year = COALESCE(nurse_profiles.graduation_year, excluded.graduation_year), \
               salary = COALESCE(nurse_profiles.salary, excluded.salary), \
               years_of_experience = MAX(nurse_profiles.years_of_experience, excluded.years_of_experience)",
        )
        .bind(subject_id)
        .bind(&record.summary)
        .bind(&record.address)
        .bind(record.graduation_year)
        .bind(record.years_of_experience)
        .bind(&record.salary)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn replace_experience(&self, subject_id: &str, entries: &[ExperienceEntry]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM nurse_experience WHERE subject_id = ?1").bind(subject_id).execute(&mut *tx).await?;
        for entry in entries {
            let experience_type = serde_json::to_value(entry.experience_type)?
                .as_str()
                .unwrap_or("employment")
                .to_string();
            sqlx::query(
                "INSERT INTO nurse_experience (id, subject_id, employer, position, experience_type, department, start_date, end_date, description, location) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(subject_id)
            .bind(&entry.employer)
            .bind(&entry.position)
            .bind(experience_type)
            .bind(&entry.department)
            .bind(&entry.start_date)
            .bind(&entry.end_date)
            .bind(&entry.description)
            .bind(&entry.location)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn replace_education(&self, subject_id: &str, entries: &[EducationEntry]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM nurse_education WHERE subject_id = ?1").bind(subject_id).execute(&mut *tx).await?;
        for entry in entries {
            sqlx::query(
                "INSERT INTO nurse_education (id, subject_id, institution, degree, field_of_study, year, institution_location, start_date, end_date, status) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(subject_id)
            .bind(&entry.institution)
            .bind(&entry.degree)
            .bind(&entry.field_of_study)
            .bind(entry.year)
            .bind(&entry.institution_location)
            .bind(&entry.start_date)
            .bind(&entry.end_date)
            .bind(&entry.status)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn replace_skills(&self, subject_id: &str, skills: &[String]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM nurse_skills WHERE subject_id = ?1").bind(subject_id).execute(&mut *tx).await?;
        for skill in skills {
            sqlx::query("INSERT INTO nurse_skills (id, subject_id, skill) VALUES (?1, ?2, ?3)")
                .bind(Uuid::new_v4().to_string())
                .bind(subject_id)
                .bind(skill)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn replace_certifications(&self, subject_id: &str, certifications: &[Certification]) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM nurse_certifications WHERE subject_id = ?1").bind(subject_id).execute(&mut *tx).await?;
        for cert in certifications {
            sqlx::query("INSERT INTO nurse_certifications (id, subject_id, cert_type, number, score) VALUES (?1, ?2, ?3, ?4, ?5)")
                .bind(Uuid::new_v4().to_string())
                .bind(subject_id)
                .bind(&cert.cert_type)
                .bind(&cert.number)
                .bind(&cert.score)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn insert_resume(
        &self,
        subject_id: &str,
        bucket: &str,
        path: &str,
        original_name: &str,
        content_type: &str,
        extracted_text: Option<&str>,
        parsed_data: Option<&str>,
    ) -> anyhow::Result<String> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO resumes (id, subject_id, bucket, path, original_name, content_type, extracted_text, parsed_data) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&id)
        .bind(subject_id)
        .bind(bucket)
        .bind(path)
        .bind(original_name)
        .bind(content_type)
        .bind(extracted_text)
        .bind(parsed_data)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn take_resumes(&self, subject_id: &str) -> anyhow::Result<Vec<ResumeRow>> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query_as::<_, (String, String, String, String, String, String)>(
            "SELECT id, subject_id, bucket, path, original_name, content_type FROM resumes WHERE subject_id = ?1",
        )
        .bind(subject_id)
        .fetch_all(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM resumes WHERE subject_id = ?1").bind(subject_id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(rows
            .into_iter()
            .map(|(id, subject_id, bucket, path, original_name, content_type)| ResumeRow {
                id,
                subject_id,
                bucket,
                path,
                original_name,
                content_type,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fs_blob_store_round_trips_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsBlobStore::new(dir.path());
        store.upload("resumes", "abc/resume.pdf", b"hello", "application/pdf").await.unwrap();
        let bytes = tokio::fs::read(dir.path().join("resumes/abc/resume.pdf")).await.unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[tokio::test]
    async fn fs_blob_store_remove_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsBlobStore::new(dir.path());
        store.remove("resumes", &["missing.pdf".to_string()]).await.unwrap();
    }

    #[tokio::test]
    async fn in_memory_metadata_store_only_fills_empty_profile_fields() {
        let store = InMemoryMetadataStore::default();
        let first = ParsedRecord {
            address: Some("Manila".into()),
            ..Default::default()
        };
        store.upsert_profile_if_empty("subject-1", &first).await.unwrap();

        let second = ParsedRecord {
            address: Some("Cebu".into()),
            summary: Some("A nurse".into()),
            ..Default::default()
        };
        store.upsert_profile_if_empty("subject-1", &second).await.unwrap();

        let profile = store.get_profile("subject-1").await.unwrap().unwrap();
        assert_eq!(profile.address.as_deref(), Some("Manila"));
        assert_eq!(profile.summary.as_deref(), Some("A nurse"));
    }

    #[tokio::test]
    async fn sqlite_store_replace_experience_is_transactional_and_idempotent() {
        let store = SqliteMetadataStore::connect_memory().await.unwrap();
        store.upsert_profile_if_empty("subject-1", &ParsedRecord::default()).await.unwrap();
        let entries = vec![ExperienceEntry {
            employer: Some("General Hospital".into()),
            position: Some("Staff Nurse".into()),
            start_date: Some("Jan 2020".into()),
            ..Default::default()
        }];
        store.replace_experience("subject-1", &entries).await.unwrap();
        store.replace_experience("subject-1", &entries).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM nurse_experience WHERE subject_id = 'subject-1'")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn sqlite_store_insert_resume_returns_id() {
        let store = SqliteMetadataStore::connect_memory().await.unwrap();
        store.upsert_profile_if_empty("subject-1", &ParsedRecord::default()).await.unwrap();
        let id = store
            .insert_resume(
                "subject-1",
                "resumes",
                "subject-1/resume.pdf",
                "resume.pdf",
                "application/pdf",
                Some("decoded text"),
                Some("{}"),
            )
            .await
            .unwrap();
        assert!(!id.is_empty());
    }

    #[tokio::test]
    async fn sqlite_store_take_resumes_clears_prior_rows() {
        let store = SqliteMetadataStore::connect_memory().await.unwrap();
        store.upsert_profile_if_empty("subject-1", &ParsedRecord::default()).await.unwrap();
        store
            .insert_resume("subject-1", "resumes", "subject-1/old.pdf", "old.pdf", "application/pdf", None, None)
            .await
            .unwrap();

        let prior = store.take_resumes("subject-1").await.unwrap();
        assert_eq!(prior.len(), 1);
        assert_eq!(prior[0].path, "subject-1/old.pdf");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM resumes WHERE subject_id = 'subject-1'")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
