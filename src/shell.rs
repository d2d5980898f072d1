//! Shell-style helpers on top of [`FileSystem`]
//!
//! Mirrors a handful of `hdfs dfs` commands: moving whole files between the
//! local disk and the cluster, and bulk ownership/permission changes.
//! Relative remote paths are resolved against the shell's working path.

use crate::client::{CreateOptions, HttpTransport, OpenOptions, Permission, Transport};
use crate::common::{format_bytes, join_path};
use crate::fs::FileSystem;
use crate::{Error, Result};
use bytes::Bytes;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Largest local file uploaded in one request
pub const MAX_UP_CHUNK: u64 = 1024 * 1024 * 1024;

/// Largest remote file read in one request
pub const MAX_DOWN_CHUNK: u64 = 500 * 1024 * 1024;

const DOWNLOAD_BUFFER: u32 = 4096;

pub struct FsShell<T = HttpTransport> {
    fs: FileSystem<T>,
    working_path: String,
}

impl<T: Transport> FsShell<T> {
    pub fn new(fs: FileSystem<T>, working_path: impl Into<String>) -> Self {
        Self {
            fs,
            working_path: working_path.into(),
        }
    }

    pub fn filesystem(&mut self) -> &mut FileSystem<T> {
        &mut self.fs
    }

    pub fn working_path(&self) -> &str {
        &self.working_path
    }

    pub fn set_working_path(&mut self, path: impl Into<String>) {
        self.working_path = path.into();
    }

    /// Absolute remote path for `path`
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with('/') {
            path.to_string()
        } else if path.is_empty() || path == "." {
            self.working_path.clone()
        } else {
            join_path(&self.working_path, path)
        }
    }

    /// Upload a local file into `remote_dir`, keeping its file name.
    ///
    /// Returns the remote path written.
    pub fn put(&mut self, local: &Path, remote_dir: &str, overwrite: bool) -> Result<String> {
        let name = local
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::InvalidParam(format!("no file name in {}", local.display())))?;
        let remote = join_path(&self.resolve(remote_dir), name);

        let data = read_local(local)?;
        let size = data.len();
        let options = CreateOptions {
            overwrite,
            ..Default::default()
        };
        self.fs.create(&remote, data, &options)?;

        info!("Put {} ({}) to {}", local.display(), format_bytes(size as u64), remote);
        Ok(remote)
    }

    /// Append each local file, in order, to `remote`.
    pub fn append_to_file<P: AsRef<Path>>(&mut self, locals: &[P], remote: &str) -> Result<()> {
        let remote = self.resolve(remote);
        for local in locals {
            let data = read_local(local.as_ref())?;
            self.fs.append(&remote, data, None)?;
            info!("Appended {} to {}", local.as_ref().display(), remote);
        }
        Ok(())
    }

    /// Write the content of each remote file to `writer`.
    ///
    /// Returns the number of bytes written.
    pub fn cat<S: AsRef<str>, W: Write>(&mut self, remotes: &[S], writer: &mut W) -> Result<u64> {
        let mut total = 0u64;
        for remote in remotes {
            let remote = self.resolve(remote.as_ref());
            let data = self.fetch(&remote)?;
            writer.write_all(&data)?;
            total += data.len() as u64;
        }
        writer.flush()?;
        Ok(total)
    }

    /// Download `remote` into the local file `local`.
    pub fn get(&mut self, remote: &str, local: &Path) -> Result<u64> {
        let remote = self.resolve(remote);
        let data = self.fetch(&remote)?;
        std::fs::write(local, &data)?;
        info!("Got {} to {}", remote, local.display());
        Ok(data.len() as u64)
    }

    /// Download `remote` and then delete it from the cluster.
    pub fn move_to_local(&mut self, remote: &str, local: &Path) -> Result<u64> {
        let size = self.get(remote, local)?;
        let remote = self.resolve(remote);
        if !self.fs.delete(&remote, false)? {
            return Err(Error::Other(format!("{} was downloaded but not deleted", remote)));
        }
        Ok(size)
    }

    pub fn chmod<S: AsRef<str>>(&mut self, paths: &[S], permission: Permission) -> Result<()> {
        for path in paths {
            let path = self.resolve(path.as_ref());
            self.fs.set_permission(&path, permission)?;
        }
        Ok(())
    }

    pub fn chown<S: AsRef<str>>(&mut self, paths: &[S], owner: &str) -> Result<()> {
        for path in paths {
            let path = self.resolve(path.as_ref());
            self.fs.set_owner(&path, owner, "")?;
        }
        Ok(())
    }

    pub fn chgrp<S: AsRef<str>>(&mut self, paths: &[S], group: &str) -> Result<()> {
        for path in paths {
            let path = self.resolve(path.as_ref());
            self.fs.set_owner(&path, "", group)?;
        }
        Ok(())
    }

    /// `false` only when the namenode reports `FileNotFoundException`
    pub fn exists(&mut self, remote: &str) -> Result<bool> {
        let remote = self.resolve(remote);
        match self.fs.get_file_status(&remote) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn fetch(&mut self, remote: &str) -> Result<Bytes> {
        let status = self.fs.get_file_status(remote)?;
        if status.is_dir() {
            return Err(Error::InvalidParam(format!("{} is a directory", remote)));
        }
        if status.length >= MAX_DOWN_CHUNK {
            return Err(Error::InvalidParam(format!(
                "{} is {}, larger than the {} single-read limit",
                remote,
                format_bytes(status.length),
                format_bytes(MAX_DOWN_CHUNK)
            )));
        }
        if status.length == 0 {
            return Ok(Bytes::new());
        }

        self.fs.open(
            remote,
            &OpenOptions {
                offset: 0,
                length: Some(status.length),
                buffer_size: Some(DOWNLOAD_BUFFER),
            },
        )
    }
}

fn read_local(path: &Path) -> Result<Bytes> {
    let size = std::fs::metadata(path)?.len();
    if size >= MAX_UP_CHUNK {
        return Err(Error::InvalidParam(format!(
            "{} is {}, larger than the {} single-upload limit",
            path.display(),
            format_bytes(size),
            format_bytes(MAX_UP_CHUNK)
        )));
    }
    Ok(Bytes::from(std::fs::read(path)?))
}
