// Domain rules - Argument grammars and run mode policy

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::errors::*;
use crate::domain::model::*;

const TIMESTAMP: &str = r"(?:\d\d:)?\d\d:\d\d\.\d\d\d";

static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{TIMESTAMP}$")).expect("valid timestamp regex"));

static CUT_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^(?P<start>{TIMESTAMP})-(?P<end>{TIMESTAMP})$"))
        .expect("valid cut range regex")
});

/// `# <path> <start>-<end>`; the path may contain spaces
pub(crate) static CLIP_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "^# (?P<path>.+?) (?P<start>{TIMESTAMP})-(?P<end>{TIMESTAMP})$"
    ))
    .expect("valid clip comment regex")
});

/// Height every crop is scaled to
pub const CROP_TARGET_HEIGHT: u32 = 1080;
/// Widest frame a crop may produce at [`CROP_TARGET_HEIGHT`]
pub const CROP_MAX_WIDTH: u32 = 1920;

/// Parse a single `(HH:)?MM:SS.mmm` timestamp
pub fn parse_timestamp(value: &str) -> DomainResult<Timestamp> {
    if TIMESTAMP_RE.is_match(value) {
        Ok(Timestamp::new_unchecked(value))
    } else {
        Err(DomainError::format(format!(
            "{:?} must be a timestamp of the form: HH:MM:SS.mmm",
            value
        )))
    }
}

/// Parse `<timestamp>-<timestamp>` without any temporal validation
pub fn parse_cut_range(value: &str) -> DomainResult<Cut> {
    match_cut_range(value).ok_or_else(|| {
        DomainError::format(format!(
            "{:?} must be value of the form: HH:MM:SS.mmm-HH:MM:SS.mmm",
            value
        ))
    })
}

/// Non-failing variant used by the instruction interpreters
pub(crate) fn match_cut_range(value: &str) -> Option<Cut> {
    let captures = CUT_RANGE_RE.captures(value)?;
    Some(Cut::new(
        Timestamp::new_unchecked(&captures["start"]),
        Timestamp::new_unchecked(&captures["end"]),
    ))
}

/// Parse a `W:H` crop ratio no wider than 16:9
pub fn parse_crop_ratio(value: &str) -> DomainResult<(u32, u32)> {
    let ratio_error = || DomainError::format(format!("{:?} must be a ratio in the form: \"W:H\"", value));

    let (width, height) = value.split_once(':').ok_or_else(ratio_error)?;
    if height.contains(':') {
        return Err(ratio_error());
    }

    let (width_ratio, height_ratio) = match (width.trim().parse::<u32>(), height.trim().parse::<u32>()) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(DomainError::format(format!(
                "{:?} must have integer values",
                value
            )))
        }
    };

    if height_ratio == 0 {
        return Err(DomainError::format(format!(
            "{:?} height cannot be zero",
            value
        )));
    }

    if u64::from(CROP_TARGET_HEIGHT) * u64::from(width_ratio)
        > u64::from(CROP_MAX_WIDTH) * u64::from(height_ratio)
    {
        return Err(DomainError::format(format!(
            "{:?} cannot exceed 16:9 ratio",
            value
        )));
    }

    Ok((width_ratio, height_ratio))
}

/// clap value parser for `--crop`
pub fn parse_crop_fragment(value: &str) -> DomainResult<FilterFragment> {
    let (width_ratio, height_ratio) = parse_crop_ratio(value)?;
    Ok(FilterFragment::CropToRatio {
        width_ratio,
        height_ratio,
    })
}

/// Parse `X:Y:W:H:filter-spec`; the spec itself may contain colons
pub fn parse_zone_filter(value: &str) -> DomainResult<FilterFragment> {
    let parts: Vec<&str> = value.splitn(5, ':').collect();
    let [x, y, w, h, spec] = parts.as_slice() else {
        return Err(DomainError::format(format!(
            "{:?} must be in the form: \"X:Y:W:H:filter-spec\"",
            value
        )));
    };

    let integer_error = || DomainError::format(format!("{:?} must have integer values", value));
    Ok(FilterFragment::Zone {
        x: x.trim().parse().map_err(|_| integer_error())?,
        y: y.trim().parse().map_err(|_| integer_error())?,
        w: w.trim().parse().map_err(|_| integer_error())?,
        h: h.trim().parse().map_err(|_| integer_error())?,
        spec: (*spec).to_string(),
    })
}

/// Parse an integer frame rate for `--fps`
pub fn parse_fps(value: &str) -> DomainResult<FilterFragment> {
    match value.trim().parse::<u32>() {
        Ok(fps) if fps > 0 => Ok(FilterFragment::Fps(fps)),
        _ => Err(DomainError::format(format!(
            "{:?} must be a positive integer frame rate",
            value
        ))),
    }
}

/// Business rule for picking the run mode
pub struct RunModeSelector;

impl RunModeSelector {
    /// Decide the run mode once from the validated configuration
    pub fn select(config: &RunConfig) -> DomainResult<RunMode> {
        match config.input_kind {
            InputKind::Join => return Ok(RunMode::JoinOnly),
            InputKind::Text => return Ok(RunMode::TextInterpreted),
            InputKind::Clips => return Ok(RunMode::ClipsInterpreted),
            InputKind::Plain => {}
        }

        if config.cuts.len() > 1 {
            Ok(RunMode::MultiCutSequence)
        } else if config.cuts.len() == 1 {
            Ok(RunMode::SingleCut)
        } else if !config.filters.is_empty() {
            Ok(RunMode::DirectFilterOnly)
        } else {
            Err(DomainError::Usage("no crop and no timestamps".to_string()))
        }
    }
}
