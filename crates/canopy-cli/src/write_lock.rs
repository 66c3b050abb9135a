//! Single-writer lock kept beside the trail files.
//!
//! The lock file holds a JSON record of the owning process. A record whose
//! process is gone is abandoned and gets reclaimed; a live one is waited on
//! for `store.lock_timeout_secs`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use canopy_config::StoreConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Owner record written into the lock file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Holder {
    pid: u32,
    acquired_at: DateTime<Utc>,
}

impl Holder {
    fn current() -> Self {
        Self {
            pid: std::process::id(),
            acquired_at: Utc::now(),
        }
    }
}

#[derive(Debug)]
enum Contention {
    Live(Holder),
    Abandoned(Holder),
    Unreadable,
}

/// Held while a command appends to the trail; dropping it frees the lock.
#[derive(Debug)]
pub struct TrailLockGuard {
    path: PathBuf,
}

impl Drop for TrailLockGuard {
    fn drop(&mut self) {
        if let Err(error) = std::fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), %error, "failed to release trail lock");
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrailLock {
    path: PathBuf,
    wait: Duration,
}

impl TrailLock {
    pub fn for_project(store: &StoreConfig, project_root: &Path) -> Self {
        Self {
            path: store.lock_path(project_root),
            wait: Duration::from_secs(store.lock_timeout_secs),
        }
    }

    /// Take the lock, reclaiming an abandoned one and polling a live one
    /// until the configured wait runs out.
    pub async fn acquire(&self) -> anyhow::Result<TrailLockGuard> {
        let deadline = Instant::now() + self.wait;
        loop {
            let contention = match self.attempt() {
                Ok(guard) => return Ok(guard),
                Err(contention) => contention,
            };

            match contention {
                Contention::Abandoned(holder) => {
                    tracing::warn!(
                        pid = holder.pid,
                        since = %holder.acquired_at,
                        path = %self.path.display(),
                        "reclaiming trail lock from exited process"
                    );
                    std::fs::remove_file(&self.path).or_else(ignore_missing)?;
                    continue;
                }
                Contention::Live(holder) if Instant::now() >= deadline => {
                    anyhow::bail!(
                        "trail is locked by pid {} since {}; retry once it finishes",
                        holder.pid,
                        holder.acquired_at
                    );
                }
                Contention::Unreadable if Instant::now() >= deadline => {
                    anyhow::bail!(
                        "unreadable trail lock at {}; delete it if no cnp process is running",
                        self.path.display()
                    );
                }
                Contention::Live(holder) => {
                    tracing::debug!(pid = holder.pid, "trail lock busy");
                }
                Contention::Unreadable => {}
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    fn attempt(&self) -> Result<TrailLockGuard, Contention> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|_| Contention::Unreadable)?;
        }

        let created = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path);
        match created {
            Ok(mut file) => {
                let guard = TrailLockGuard {
                    path: self.path.clone(),
                };
                let record =
                    serde_json::to_vec(&Holder::current()).map_err(|_| Contention::Unreadable)?;
                file.write_all(&record).map_err(|_| Contention::Unreadable)?;
                Ok(guard)
            }
            Err(error) if error.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(self.inspect_holder())
            }
            Err(_) => Err(Contention::Unreadable),
        }
    }

    fn inspect_holder(&self) -> Contention {
        let Ok(raw) = std::fs::read(&self.path) else {
            return Contention::Unreadable;
        };
        match serde_json::from_slice::<Holder>(&raw) {
            Ok(holder) if process_alive(holder.pid) => Contention::Live(holder),
            Ok(holder) => Contention::Abandoned(holder),
            Err(_) => Contention::Unreadable,
        }
    }
}

fn ignore_missing(error: std::io::Error) -> std::io::Result<()> {
    if error.kind() == std::io::ErrorKind::NotFound {
        Ok(())
    } else {
        Err(error)
    }
}

#[cfg(target_os = "linux")]
fn process_alive(pid: u32) -> bool {
    Path::new("/proc").join(pid.to_string()).exists()
}

#[cfg(not(target_os = "linux"))]
fn process_alive(pid: u32) -> bool {
    std::process::Command::new("kill")
        .args(["-0", &pid.to_string()])
        .status()
        .is_ok_and(|status| status.success())
}
