use std::collections::BTreeMap;

use thiserror::Error;

use crate::report::WatchList;

const ALL: &[&str] = &[
    "ascmanager", "BmfCol", "BmfExcReceiver", "BmfExcSender", "CctCtl", "ctlkcmdpro",
    "daccompms", "daccomrss", "daccontrol", "dbpoller", "dbserver", "dpckeqpmgr",
    "dpckvarmgr", "EcsSmc", "EcsSys", "ftsserver", "HdvServer", "historyserver", "inputmgr",
    "LoginServer", "opmserver", "PasCtl", "PisCtl", "RadCom", "RadCtl", "RadPgr",
    "ReaPrgServer", "scsalarmserver", "scsctlgrcserver", "SigCtlServer", "SigDpc", "SigLdt",
    "SigLoc", "taonameserv", "TelSvr", "tmcpex", "tmcsup",
];

const ATS: &[&str] = &[
    "ascmanager", "BmfCol", "ctlkcmdpro", "daccompms", "daccomrss", "daccontrol", "dbpoller",
    "dbserver", "dpckeqpmgr", "dpckvarmgr", "ftsserver", "HdvServer", "inputmgr",
    "ReaPrgServer", "scsalarmserver", "SigCtlServer", "SigDpc", "SigLdt", "SigLoc",
    "taonameserv", "tmcpex", "tmcsup",
];

const CMS: &[&str] = &[
    "ascmanager", "BmfCol", "BmfExcReceiver", "BmfExcSender", "CctCtl", "ctlkcmdpro",
    "daccompms", "daccontrol", "dbpoller", "dbserver", "dpckeqpmgr", "dpckvarmgr",
    "ftsserver", "HdvServer", "historyserver", "inputmgr", "LoginServer", "opmserver",
    "PasCtl", "PisCtl", "RadCom", "RadCtl", "ReaPrgServer", "scsalarmserver",
    "scsctlgrcserver", "taonameserv", "TelSvr",
];

const SMS: &[&str] = &[
    "ascmanager", "BmfCol", "CctCtl", "ctlkcmdpro", "daccompms", "daccomrss", "daccontrol",
    "dbpoller", "dbserver", "dpckeqpmgr", "dpckvarmgr", "EcsSmc", "EcsSys", "ftsserver",
    "HdvServer", "historyserver", "inputmgr", "LoginServer", "PasCtl", "PisCtl", "RadCom",
    "RadCtl", "RadPgr", "ReaPrgServer", "scsalarmserver", "scsctlgrcserver", "SigCtlServer",
    "SigDpc", "SigLdt", "SigLoc", "taonameserv", "TelSvr",
];

const DCS: &[&str] = &[
    "ascmanager", "BmfCol", "CctCtl", "ctlkcmdpro", "daccompms", "daccomrss", "daccontrol",
    "dbpoller", "dbserver", "dpckeqpmgr", "dpckvarmgr", "EcsSmc", "EcsSys", "ftsserver",
    "HdvServer", "historyserver", "inputmgr", "LoginServer", "PasCtl", "PisCtl", "RadCom",
    "RadCtl", "RadPgr", "ReaPrgServer", "scsalarmserver", "scsctlgrcserver", "SigCtlServer",
    "SigDpc", "SigLdt", "SigLoc", "taonameserv", "TelSvr", "tmcsup",
];

const ECS: &[&str] = &[
    "ascmanager", "BmfCol", "daccompms", "daccomrss", "daccontrol", "dbpoller", "dbserver",
    "dpckeqpmgr", "dpckvarmgr", "EcsSmc", "EcsSys", "HdvServer", "inputmgr", "ReaPrgServer",
    "scsalarmserver", "scsctlgrcserver", "taonameserv",
];

pub const BUILTIN_PRESETS: [(&str, &[&str]); 6] = [
    ("all", ALL),
    ("ats", ATS),
    ("cms", CMS),
    ("dcs", DCS),
    ("ecs", ECS),
    ("sms", SMS),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WatchListError {
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
    #[error("at least one process must be specified")]
    Empty,
}

pub fn builtin_preset(name: &str) -> Option<&'static [&'static str]> {
    BUILTIN_PRESETS
        .iter()
        .find(|(preset, _)| *preset == name)
        .map(|(_, processes)| *processes)
}

/// Look up `name`, preferring presets from the config file over built-ins.
pub fn resolve_preset(name: &str, custom: &BTreeMap<String, Vec<String>>) -> Option<Vec<String>> {
    if let Some(processes) = custom.get(name) {
        return Some(processes.clone());
    }
    builtin_preset(name).map(|processes| processes.iter().map(|p| p.to_string()).collect())
}

/// Preset processes first, then the explicit ones not already listed.
pub fn build_watch_list(
    preset: Option<&str>,
    processes: &[String],
    custom: &BTreeMap<String, Vec<String>>,
) -> Result<WatchList, WatchListError> {
    let mut watch = WatchList::default();
    if let Some(name) = preset {
        let names = resolve_preset(name, custom)
            .filter(|names| !names.is_empty())
            .ok_or_else(|| WatchListError::UnknownPreset(name.to_string()))?;
        watch.extend(names);
    }
    watch.extend(processes.iter().cloned());

    if watch.is_empty() {
        return Err(WatchListError::Empty);
    }
    Ok(watch)
}
