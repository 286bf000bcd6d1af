//! Field layout of the `JOB_FINISH` event.
//!
//! The order of [`JOB_FINISH_LAYOUT`] is the order fields appear on the line.
//! Field names follow the `lsb.acct` documentation.

/// Event type marker of a job-finish line.
pub const JOB_FINISH: &str = "JOB_FINISH";

/// One positional field of a `JOB_FINISH` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    EventType,
    Version,
    EventTime,
    JobId,
    UserId,
    Options,
    NumProcessors,
    SubmitTime,
    BeginTime,
    TermTime,
    StartTime,
    UserName,
    Queue,
    ResReq,
    DependCond,
    PreExecCmd,
    FromHost,
    Cwd,
    InFile,
    OutFile,
    ErrFile,
    JobFile,
    /// Count of the `AskedHosts` tokens that follow
    NumAskedHosts,
    AskedHosts,
    /// Count of the `ExecHosts` tokens that follow
    NumExHosts,
    ExecHosts,
    JobStatus,
    HostFactor,
    JobName,
    Command,
    Utime,
    Stime,
    Maxrss,
    Ixrss,
    Ismrss,
    Idrss,
    Isrss,
    Minflt,
    Majflt,
    Nswap,
    Inblock,
    Oublock,
    Ioch,
    Msgsnd,
    Msgrcv,
    Nsignals,
    Nvcsw,
    Nivcsw,
    Exutime,
    MailUser,
    ProjectName,
    ExitStatus,
    MaxNumProcessors,
    LoginShell,
    TimeEvent,
    Idx,
    MaxRMem,
    MaxRSwap,
    InFileSpool,
    CommandSpool,
    RsvId,
    Sla,
    ExceptMask,
    AdditionalInfo,
    /// Termination code
    ExitInfo,
    WarningAction,
    WarningTimePeriod,
    ChargedSaap,
    LicenseProject,
}

impl Field {
    /// Name of the field as documented for `lsb.acct`.
    pub fn name(self) -> &'static str {
        match self {
            Field::EventType => "eventType",
            Field::Version => "version",
            Field::EventTime => "eventTime",
            Field::JobId => "jobId",
            Field::UserId => "userId",
            Field::Options => "options",
            Field::NumProcessors => "numProcessors",
            Field::SubmitTime => "submitTime",
            Field::BeginTime => "beginTime",
            Field::TermTime => "termTime",
            Field::StartTime => "startTime",
            Field::UserName => "userName",
            Field::Queue => "queue",
            Field::ResReq => "resReq",
            Field::DependCond => "dependCond",
            Field::PreExecCmd => "preExecCmd",
            Field::FromHost => "fromHost",
            Field::Cwd => "cwd",
            Field::InFile => "inFile",
            Field::OutFile => "outFile",
            Field::ErrFile => "errFile",
            Field::JobFile => "jobFile",
            Field::NumAskedHosts => "numAskedHosts",
            Field::AskedHosts => "askedHosts",
            Field::NumExHosts => "numExHosts",
            Field::ExecHosts => "execHosts",
            Field::JobStatus => "jStatus",
            Field::HostFactor => "hostFactor",
            Field::JobName => "jobName",
            Field::Command => "command",
            Field::Utime => "ru_utime",
            Field::Stime => "ru_stime",
            Field::Maxrss => "ru_maxrss",
            Field::Ixrss => "ru_ixrss",
            Field::Ismrss => "ru_ismrss",
            Field::Idrss => "ru_idrss",
            Field::Isrss => "ru_isrss",
            Field::Minflt => "ru_minflt",
            Field::Majflt => "ru_majflt",
            Field::Nswap => "ru_nswap",
            Field::Inblock => "ru_inblock",
            Field::Oublock => "ru_oublock",
            Field::Ioch => "ru_ioch",
            Field::Msgsnd => "ru_msgsnd",
            Field::Msgrcv => "ru_msgrcv",
            Field::Nsignals => "ru_nsignals",
            Field::Nvcsw => "ru_nvcsw",
            Field::Nivcsw => "ru_nivcsw",
            Field::Exutime => "ru_exutime",
            Field::MailUser => "mailUser",
            Field::ProjectName => "projectName",
            Field::ExitStatus => "exitStatus",
            Field::MaxNumProcessors => "maxNumProcessors",
            Field::LoginShell => "loginShell",
            Field::TimeEvent => "timeEvent",
            Field::Idx => "idx",
            Field::MaxRMem => "maxRMem",
            Field::MaxRSwap => "maxRSwap",
            Field::InFileSpool => "inFileSpool",
            Field::CommandSpool => "commandSpool",
            Field::RsvId => "rsvId",
            Field::Sla => "sla",
            Field::ExceptMask => "exceptMask",
            Field::AdditionalInfo => "additionalInfo",
            Field::ExitInfo => "exitInfo",
            Field::WarningAction => "warningAction",
            Field::WarningTimePeriod => "warningTimePeriod",
            Field::ChargedSaap => "chargedSAAP",
            Field::LicenseProject => "licenseProject",
        }
    }
}

/// Positional layout of a `JOB_FINISH` line.
///
/// Host list fields take as many tokens as the count field before them;
/// every other field takes exactly one.
pub const JOB_FINISH_LAYOUT: &[Field] = &[
    Field::EventType,
    Field::Version,
    Field::EventTime,
    Field::JobId,
    Field::UserId,
    Field::Options,
    Field::NumProcessors,
    Field::SubmitTime,
    Field::BeginTime,
    Field::TermTime,
    Field::StartTime,
    Field::UserName,
    Field::Queue,
    Field::ResReq,
    Field::DependCond,
    Field::PreExecCmd,
    Field::FromHost,
    Field::Cwd,
    Field::InFile,
    Field::OutFile,
    Field::ErrFile,
    Field::JobFile,
    Field::NumAskedHosts,
    Field::AskedHosts,
    Field::NumExHosts,
    Field::ExecHosts,
    Field::JobStatus,
    Field::HostFactor,
    Field::JobName,
    Field::Command,
    Field::Utime,
    Field::Stime,
    Field::Maxrss,
    Field::Ixrss,
    Field::Ismrss,
    Field::Idrss,
    Field::Isrss,
    Field::Minflt,
    Field::Majflt,
    Field::Nswap,
    Field::Inblock,
    Field::Oublock,
    Field::Ioch,
    Field::Msgsnd,
    Field::Msgrcv,
    Field::Nsignals,
    Field::Nvcsw,
    Field::Nivcsw,
    Field::Exutime,
    Field::MailUser,
    Field::ProjectName,
    Field::ExitStatus,
    Field::MaxNumProcessors,
    Field::LoginShell,
    Field::TimeEvent,
    Field::Idx,
    Field::MaxRMem,
    Field::MaxRSwap,
    Field::InFileSpool,
    Field::CommandSpool,
    Field::RsvId,
    Field::Sla,
    Field::ExceptMask,
    Field::AdditionalInfo,
    Field::ExitInfo,
    Field::WarningAction,
    Field::WarningTimePeriod,
    Field::ChargedSaap,
    Field::LicenseProject,
];
