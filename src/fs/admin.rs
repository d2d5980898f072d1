use super::FileSystem;
use crate::client::{
    ContentSummary, FileChecksum, FileStatus, Op, OpParams, Permission, Transport,
};
use crate::Result;

impl<T: Transport> FileSystem<T> {
    pub fn rename(&mut self, source: &str, destination: &str) -> Result<bool> {
        let params = OpParams::rename(destination)?;
        self.dispatcher.call(Some(source), &params)?.into_boolean()
    }

    pub fn delete(&mut self, path: &str, recursive: bool) -> Result<bool> {
        self.dispatcher
            .call(Some(path), &OpParams::delete(recursive))?
            .into_boolean()
    }

    pub fn set_permission(&mut self, path: &str, permission: Permission) -> Result<()> {
        self.dispatcher
            .call(Some(path), &OpParams::set_permission(permission))?;
        Ok(())
    }

    /// Change owner and/or group; pass `""` to leave one unchanged.
    pub fn set_owner(&mut self, path: &str, owner: &str, group: &str) -> Result<()> {
        let params = OpParams::set_owner(owner, group)?;
        self.dispatcher.call(Some(path), &params)?;
        Ok(())
    }

    pub fn set_replication(&mut self, path: &str, replication: u16) -> Result<bool> {
        let params = OpParams::set_replication(replication)?;
        self.dispatcher.call(Some(path), &params)?.into_boolean()
    }

    /// Times are milliseconds since epoch; `-1` keeps the current value.
    pub fn set_times(&mut self, path: &str, access_time: i64, modification_time: i64) -> Result<()> {
        self.dispatcher
            .call(Some(path), &OpParams::set_times(access_time, modification_time))?;
        Ok(())
    }

    pub fn mkdirs(&mut self, path: &str, permission: Permission) -> Result<bool> {
        self.dispatcher
            .call(Some(path), &OpParams::mkdirs(permission))?
            .into_boolean()
    }

    /// Create `link` pointing at `target`.
    pub fn create_symlink(&mut self, target: &str, link: &str, create_parent: bool) -> Result<()> {
        let params = OpParams::create_symlink(link, create_parent)?;
        self.dispatcher.call(Some(target), &params)?;
        Ok(())
    }

    pub fn get_file_status(&mut self, path: &str) -> Result<FileStatus> {
        self.dispatcher
            .call(Some(path), &OpParams::new(Op::GetFileStatus))?
            .into_file_status()
    }

    pub fn list_status(&mut self, path: &str) -> Result<Vec<FileStatus>> {
        self.dispatcher
            .call(Some(path), &OpParams::new(Op::ListStatus))?
            .into_file_statuses()
    }

    pub fn get_content_summary(&mut self, path: &str) -> Result<ContentSummary> {
        self.dispatcher
            .call(Some(path), &OpParams::new(Op::GetContentSummary))?
            .into_content_summary()
    }

    pub fn get_file_checksum(&mut self, path: &str) -> Result<FileChecksum> {
        self.dispatcher
            .call(Some(path), &OpParams::new(Op::GetFileChecksum))?
            .into_file_checksum()
    }

    /// Home directory of the acting user, e.g. `/user/webuser`
    pub fn get_home_directory(&mut self) -> Result<String> {
        self.dispatcher
            .call(None, &OpParams::new(Op::GetHomeDirectory))?
            .into_path()
    }
}
