/// The materialized option set handed to the processing pipeline.
use std::path::PathBuf;

/// Everything downstream stages need to know, resolved from the command line.
///
/// Built once by the CLI layer after validation succeeds and never mutated
/// afterwards. Fields with a `None` mean the corresponding flag was not given;
/// the consumer decides the fallback (e.g. an absent ROI extent means the full
/// image extent).
#[derive(Debug, Clone, PartialEq)]
pub struct StatParams {
    /// Path to the input bathymetry map (geoTIFF or XYZ point collection).
    pub input: PathBuf,
    /// Destination path for the exported results.
    pub output: Option<PathBuf>,
    /// Verbosity level. Zero or absent means quiet.
    pub verbose: Option<i32>,
    /// Worker-count hint for the parallel processing stages.
    pub nthreads: Option<usize>,
    /// Lower limit of the histogram range.
    pub hmin: f64,
    /// Upper limit of the histogram range.
    pub hmax: f64,
    /// Number of histogram bins.
    pub nbins: u32,
    /// Skip the histogram entirely and only compute scalar stats.
    pub nohist: bool,
    /// Unit system for the ROI dimensions (px, mm, cm, m, percent).
    pub units: String,
    /// Suppress the header row in the exported table.
    pub noheader: Option<i32>,
    /// Free integer parameter for testing purposes.
    pub int_param: Option<i32>,
    /// Free float parameter for testing purposes.
    pub float_param: Option<f32>,
    /// ROI width in `units`. Absent means the full image width.
    pub roi_width: Option<f64>,
    /// ROI height in `units`. Absent means the full image height.
    pub roi_height: Option<f64>,
}

impl StatParams {
    /// One line per field, for the verbose configuration echo at startup.
    pub fn describe(&self) -> Vec<String> {
        fn opt<T: std::fmt::Display>(value: &Option<T>) -> String {
            match value {
                Some(v) => v.to_string(),
                None => "not set".to_string(),
            }
        }

        vec![
            format!("input: {}", self.input.display()),
            format!("output: {}", opt(&self.output.as_ref().map(|p| p.display().to_string()))),
            format!("verbose: {}", opt(&self.verbose)),
            format!("nthreads: {}", opt(&self.nthreads)),
            format!("hmin: {}", self.hmin),
            format!("hmax: {}", self.hmax),
            format!("nbins: {}", self.nbins),
            format!("nohist: {}", self.nohist),
            format!("units: {}", self.units),
            format!("noheader: {}", opt(&self.noheader)),
            format!("int: {}", opt(&self.int_param)),
            format!("float: {}", opt(&self.float_param)),
            format!("roiwidth: {}", opt(&self.roi_width)),
            format!("roiheight: {}", opt(&self.roi_height)),
        ]
    }
}
