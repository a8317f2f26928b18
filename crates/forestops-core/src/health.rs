use std::collections::VecDeque;

use rand::Rng;

/// Samples kept per series.
pub const WINDOW: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    pub used: u32,
    pub total: u32,
}

impl DiskUsage {
    pub fn percent(&self) -> u16 {
        if self.total == 0 {
            return 0;
        }
        ((self.used as u64 * 100) / self.total as u64).min(100) as u16
    }
}

/// Simulated host metrics for the system health view.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthMonitor {
    cpu: VecDeque<u64>,
    memory: VecDeque<u64>,
    pub disk: DiskUsage,
    pub active_users: u32,
    pub operational: bool,
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self {
            cpu: VecDeque::with_capacity(WINDOW),
            memory: VecDeque::with_capacity(WINDOW),
            disk: DiskUsage { used: 0, total: 100 },
            active_users: 0,
            operational: true,
        }
    }
}

impl HealthMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, cpu: u64, memory: u64, disk_used: u32, active_users: u32) {
        push_bounded(&mut self.cpu, cpu);
        push_bounded(&mut self.memory, memory);
        self.disk = DiskUsage {
            used: disk_used,
            total: 100,
        };
        self.active_users = active_users;
    }

    pub fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let cpu = rng.gen_range(0..100);
        let memory = rng.gen_range(0..100);
        let disk = rng.gen_range(10..90);
        let users = rng.gen_range(10..60);
        self.record(cpu, memory, disk, users);
    }

    pub fn cpu(&self) -> Vec<u64> {
        self.cpu.iter().copied().collect()
    }

    pub fn memory(&self) -> Vec<u64> {
        self.memory.iter().copied().collect()
    }

    pub fn status_label(&self) -> &'static str {
        if self.operational {
            "Operational"
        } else {
            "Degraded"
        }
    }
}

fn push_bounded(series: &mut VecDeque<u64>, value: u64) {
    if series.len() == WINDOW {
        series.pop_front();
    }
    series.push_back(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_last_twelve_samples() {
        let mut h = HealthMonitor::new();
        for i in 0..20 {
            h.record(i, i * 2, 50, 10);
        }
        let cpu = h.cpu();
        assert_eq!(cpu.len(), WINDOW);
        assert_eq!(cpu.first(), Some(&8));
        assert_eq!(cpu.last(), Some(&19));
    }

    #[test]
    fn random_samples_stay_in_range() {
        let mut h = HealthMonitor::new();
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            h.sample(&mut rng);
            assert!(h.cpu().iter().all(|v| *v < 100));
            assert!((10..90).contains(&h.disk.used));
            assert!((10..60).contains(&h.active_users));
        }
        assert_eq!(h.disk.percent() as u32, h.disk.used);
    }
}
