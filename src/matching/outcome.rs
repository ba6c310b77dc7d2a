use serde::Serialize;

use crate::core::types::{EmergencyFlag, Species};
use crate::matching::engine::MatchResult;

/// Fixed advice text: a headline and ordered steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guidance {
    pub headline: &'static str,
    pub steps: &'static [&'static str],
}

/// Immediate-care instructions returned when any emergency flag is set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyDirective {
    pub headline: &'static str,
    pub hotline: &'static str,
    pub steps: &'static [&'static str],
}

/// What to bring and record before a vet visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitPreparation {
    pub materials: &'static [&'static str],
    pub records: &'static [&'static str],
}

pub static EMERGENCY_DIRECTIVE: EmergencyDirective = EmergencyDirective {
    headline: "立即就医！",
    hotline: "400-000-0000",
    steps: &["保持宠物安静", "准备就医", "记录症状"],
};

pub const INSUFFICIENT_INPUT_MESSAGE: &str = "请至少选择一个症状";

pub static NO_MATCH_GUIDANCE: Guidance = Guidance {
    headline: "未找到高度匹配的疾病",
    steps: &[
        "观察24小时，记录症状变化",
        "如症状持续，请咨询专业兽医",
        "注意宠物的饮食和排泄情况",
    ],
};

pub static NO_REFERENCE_DATA_GUIDANCE: Guidance = Guidance {
    headline: "暂无该物种的参考数据",
    steps: &[
        "观察24小时，记录症状变化",
        "请咨询熟悉该物种的专业兽医",
        "注意宠物的饮食和排泄情况",
    ],
};

pub static VISIT_PREPARATION: VisitPreparation = VisitPreparation {
    materials: &["宠物年龄、品种", "疫苗和驱虫记录", "症状开始时间", "饮食变化记录"],
    records: &["异常部位照片", "呕吐物/排泄物", "异常行为视频", "饮食和饮水情况"],
};

pub const DISCLAIMER: &str = "本工具仅供参考，不能替代专业兽医诊断。紧急情况请立即联系宠物医院。";

/// The single terminal result of one triage request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// An emergency flag was set; matching never ran
    Emergency {
        flags: Vec<EmergencyFlag>,
        directive: &'static EmergencyDirective,
    },

    /// No symptoms were supplied
    InsufficientInput { message: &'static str },

    /// The species has no reference table
    NoReferenceData {
        species: Species,
        guidance: &'static Guidance,
    },

    /// No condition shares a symptom with the case
    NoMatch { guidance: &'static Guidance },

    /// Best matches, highest ratio first
    RankedResults {
        results: Vec<MatchResult>,
        preparation: &'static VisitPreparation,
    },
}

impl Outcome {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Emergency { .. } => "emergency",
            Self::InsufficientInput { .. } => "insufficient_input",
            Self::NoReferenceData { .. } => "no_reference_data",
            Self::NoMatch { .. } => "no_match",
            Self::RankedResults { .. } => "ranked_results",
        }
    }

    /// Ranked results, empty for every other outcome
    #[must_use]
    pub fn results(&self) -> &[MatchResult] {
        match self {
            Self::RankedResults { results, .. } => results,
            _ => &[],
        }
    }
}
