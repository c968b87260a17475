use std::mem::MaybeUninit;

use crate::model::StorageBreakdown;

pub struct DiskInfo {
    pub total: u64,
    pub available: u64,
    pub used: u64,
}

impl DiskInfo {
    /// Real total and free space, with the used part split in the
    /// simulated category proportions.
    pub fn breakdown(&self) -> StorageBreakdown {
        StorageBreakdown::from_usage(self.total, self.available)
    }
}

/// Query the root volume. `None` if `statvfs` fails.
pub fn get_disk_info() -> Option<DiskInfo> {
    let mut stat = MaybeUninit::<libc::statvfs>::uninit();
    let path = b"/\0";
    let ret = unsafe { libc::statvfs(path.as_ptr() as *const libc::c_char, stat.as_mut_ptr()) };
    if ret != 0 {
        return None;
    }
    let stat = unsafe { stat.assume_init() };
    let block_size = stat.f_frsize as u64;
    let total = stat.f_blocks as u64 * block_size;
    let available = stat.f_bavail as u64 * block_size;
    let used = total.saturating_sub(available);
    Some(DiskInfo {
        total,
        available,
        used,
    })
}

/// Breakdown for the dashboard: the root volume when it can be read and
/// `simulated` is false, otherwise the simulated figures.
pub fn storage_breakdown(simulated: bool) -> StorageBreakdown {
    if simulated {
        return StorageBreakdown::simulated();
    }
    match get_disk_info() {
        Some(info) if info.total > 0 => info.breakdown(),
        _ => StorageBreakdown::simulated(),
    }
}
