use featbench_core::{DetectError, DetectResult, Detection, Descriptors, FeatureDetector, GrayImage, Keypoint};

/// In-process detector returning a fixed keypoint list
pub struct ScriptedDetector {
    name: String,
    keypoints: Vec<Keypoint>,
    descriptors: bool,
    fail_on_call: Option<usize>,
    calls: usize,
}

impl ScriptedDetector {
    pub fn new(name: &str, keypoints: Vec<Keypoint>) -> Self {
        Self {
            name: name.to_string(),
            keypoints,
            descriptors: false,
            fail_on_call: None,
            calls: 0,
        }
    }

    /// Attach a 32-byte descriptor row per keypoint
    pub fn with_descriptors(mut self) -> Self {
        self.descriptors = true;
        self
    }

    /// Fail on the `n`th call (0-based)
    pub fn failing_on_call(mut self, n: usize) -> Self {
        self.fail_on_call = Some(n);
        self
    }

    pub fn boxed(self) -> Box<dyn FeatureDetector> {
        Box::new(self)
    }
}

impl FeatureDetector for ScriptedDetector {
    fn name(&self) -> &str {
        &self.name
    }

    fn computes_descriptors(&self) -> bool {
        self.descriptors
    }

    fn run(&mut self, _image: &GrayImage) -> DetectResult<Detection> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_on_call == Some(call) {
            return Err(DetectError::native(&self.name, "scripted failure"));
        }
        let mut detection = Detection::keypoints_only(self.keypoints.clone());
        if self.descriptors {
            let rows = self.keypoints.len();
            detection.descriptors =
                Descriptors::from_raw(rows, 32, vec![0xAB; rows * 32]).expect("descriptor shape");
        }
        Ok(detection)
    }
}

/// Three keypoints with responses 1, 2 and 4
pub fn three_keypoints() -> Vec<Keypoint> {
    vec![
        Keypoint::new(4.0, 4.0, 8.0).with_response(1.0),
        Keypoint::new(10.5, 12.25, 6.0).with_angle(90.0).with_response(2.0).with_octave(1),
        Keypoint::new(20.0, 8.0, 12.0).with_angle(45.0).with_response(4.0).with_octave(2),
    ]
}
