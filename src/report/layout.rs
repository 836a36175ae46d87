/// Resource tracked per process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Virtual memory size (`VIRT`), in KiB.
    VirtualMemory,
    /// CPU usage (`%CPU`).
    CpuPercent,
}

impl Metric {
    /// Decimal digits used when writing values of this metric.
    pub fn precision(self) -> usize {
        match self {
            Metric::VirtualMemory => 0,
            Metric::CpuPercent => 1,
        }
    }

    pub fn role(self) -> ColumnRole {
        match self {
            Metric::VirtualMemory => ColumnRole::VirtualMemory,
            Metric::CpuPercent => ColumnRole::CpuPercent,
        }
    }

    /// Short name used in generated file names (`top.log-mem.csv`).
    pub fn file_suffix(self) -> &'static str {
        match self {
            Metric::VirtualMemory => "mem",
            Metric::CpuPercent => "cpu",
        }
    }
}

/// Meaning of a column in a process status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    VirtualMemory,
    CpuPercent,
    ProcessName,
}

/// Zero-based field positions of each column role in a status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnLayout {
    pub virtual_memory: usize,
    pub cpu_percent: usize,
    pub process_name: usize,
}

impl Default for ColumnLayout {
    /// `PID USER PR NI VIRT RES SHR S %CPU %MEM TIME+ COMMAND`
    fn default() -> Self {
        ColumnLayout {
            virtual_memory: 4,
            cpu_percent: 8,
            process_name: 11,
        }
    }
}

impl ColumnLayout {
    pub fn index_of(&self, role: ColumnRole) -> usize {
        match role {
            ColumnRole::VirtualMemory => self.virtual_memory,
            ColumnRole::CpuPercent => self.cpu_percent,
            ColumnRole::ProcessName => self.process_name,
        }
    }

    pub fn metric_column(&self, metric: Metric) -> usize {
        self.index_of(metric.role())
    }

    /// Smallest number of fields a line needs to carry both the metric and the
    /// process name.
    pub fn min_fields(&self, metric: Metric) -> usize {
        self.metric_column(metric).max(self.process_name) + 1
    }
}
