//! Color space math
//!
//! Everything converges on gamma-encoded sRGB in 0..=1. Channel values may
//! leave that range; the caller clips.

type Vec3 = [f64; 3];
type Mat3 = [[f64; 3]; 3];

const D50_WHITE: Vec3 = [0.3457 / 0.3585, 1.0, (1.0 - 0.3457 - 0.3585) / 0.3585];

const LAB_EPSILON: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

const D50_TO_D65: Mat3 = [
    [0.955_473_452_704_218_2, -0.023_098_536_874_261_423, 0.063_259_308_661_021_7],
    [-0.028_369_706_963_208_136, 1.009_995_458_005_822_6, 0.021_041_398_966_943_008],
    [0.012_314_001_688_319_899, -0.020_507_696_433_477_912, 1.330_365_936_608_075_3],
];

const XYZ_D65_TO_LINEAR_SRGB: Mat3 = [
    [3.240_969_941_904_522_6, -1.537_383_177_570_094, -0.498_610_760_293_003_4],
    [-0.969_243_636_280_879_6, 1.875_967_501_507_720_2, 0.041_555_057_407_175_59],
    [0.055_630_079_696_993_66, -0.203_976_958_888_976_52, 1.056_971_514_242_878_6],
];

const DISPLAY_P3_TO_XYZ_D65: Mat3 = [
    [0.486_570_948_648_216_2, 0.265_667_693_169_093_06, 0.198_217_285_234_362_5],
    [0.228_974_564_069_748_8, 0.691_738_521_836_506_4, 0.079_286_914_093_745],
    [0.0, 0.045_113_381_858_902_64, 1.043_944_368_900_976],
];

const A98_TO_XYZ_D65: Mat3 = [
    [0.576_669_042_910_130_5, 0.185_558_237_906_546_3, 0.188_228_646_234_994_7],
    [0.297_344_975_250_536_05, 0.627_363_566_255_466_1, 0.075_291_458_493_997_88],
    [0.027_031_361_386_412_34, 0.070_688_852_535_827_23, 0.991_337_536_837_638_8],
];

const PROPHOTO_TO_XYZ_D50: Mat3 = [
    [0.797_760_489_672_302_7, 0.135_185_837_175_740_31, 0.031_349_349_581_524_8],
    [0.288_071_128_229_293_4, 0.711_843_217_810_101_4, 0.000_085_653_960_605_259_02],
    [0.0, 0.0, 0.825_104_602_510_460_1],
];

const REC2020_TO_XYZ_D65: Mat3 = [
    [0.636_958_048_301_291_4, 0.144_616_903_586_208_32, 0.168_880_975_164_172_1],
    [0.262_700_212_011_267_1, 0.677_998_071_518_870_8, 0.059_301_716_469_861_96],
    [0.0, 0.028_072_693_049_087_428, 1.060_985_057_710_791],
];

fn mul(m: &Mat3, v: Vec3) -> Vec3 {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

fn srgb_encode(c: f64) -> f64 {
    let abs = c.abs();
    if abs <= 0.003_130_8 {
        c * 12.92
    } else {
        c.signum() * (1.055 * abs.powf(1.0 / 2.4) - 0.055)
    }
}

fn srgb_decode(c: f64) -> f64 {
    let abs = c.abs();
    if abs <= 0.040_45 {
        c / 12.92
    } else {
        c.signum() * ((abs + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_srgb_to_srgb(v: Vec3) -> Vec3 {
    v.map(srgb_encode)
}

fn xyz_d65_to_srgb(xyz: Vec3) -> Vec3 {
    linear_srgb_to_srgb(mul(&XYZ_D65_TO_LINEAR_SRGB, xyz))
}

fn xyz_d50_to_srgb(xyz: Vec3) -> Vec3 {
    xyz_d65_to_srgb(mul(&D50_TO_D65, xyz))
}

pub(crate) fn hsl_to_srgb(hue: f64, saturation: f64, lightness: f64) -> Vec3 {
    let hue = hue.rem_euclid(360.0);
    let saturation = saturation.clamp(0.0, 1.0);
    let lightness = lightness.clamp(0.0, 1.0);
    let f = |n: f64| {
        let k = (n + hue / 30.0) % 12.0;
        let a = saturation * lightness.min(1.0 - lightness);
        lightness - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
    };
    [f(0.0), f(8.0), f(4.0)]
}

pub(crate) fn hwb_to_srgb(hue: f64, whiteness: f64, blackness: f64) -> Vec3 {
    let white = whiteness.clamp(0.0, 1.0);
    let black = blackness.clamp(0.0, 1.0);
    if white + black >= 1.0 {
        return [white / (white + black); 3];
    }
    let scale = 1.0 - white - black;
    hsl_to_srgb(hue, 1.0, 0.5).map(|c| c * scale + white)
}

pub(crate) fn lab_to_srgb(l: f64, a: f64, b: f64) -> Vec3 {
    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;

    let x = if fx.powi(3) > LAB_EPSILON {
        fx.powi(3)
    } else {
        (116.0 * fx - 16.0) / LAB_KAPPA
    };
    let y = if l > LAB_KAPPA * LAB_EPSILON {
        fy.powi(3)
    } else {
        l / LAB_KAPPA
    };
    let z = if fz.powi(3) > LAB_EPSILON {
        fz.powi(3)
    } else {
        (116.0 * fz - 16.0) / LAB_KAPPA
    };

    xyz_d50_to_srgb([x * D50_WHITE[0], y * D50_WHITE[1], z * D50_WHITE[2]])
}

pub(crate) fn lch_to_srgb(l: f64, chroma: f64, hue: f64) -> Vec3 {
    let (a, b) = polar_to_cartesian(chroma, hue);
    lab_to_srgb(l, a, b)
}

pub(crate) fn oklab_to_srgb(l: f64, a: f64, b: f64) -> Vec3 {
    let l_ = l + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
    let m_ = l - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
    let s_ = l - 0.089_484_177_5 * a - 1.291_485_548 * b;

    let (l3, m3, s3) = (l_.powi(3), m_.powi(3), s_.powi(3));

    linear_srgb_to_srgb([
        4.076_741_662_1 * l3 - 3.307_711_591_3 * m3 + 0.230_969_929_2 * s3,
        -1.268_438_004_6 * l3 + 2.609_757_401_1 * m3 - 0.341_319_396_5 * s3,
        -0.004_196_086_3 * l3 - 0.703_418_614_7 * m3 + 1.707_614_701 * s3,
    ])
}

pub(crate) fn oklch_to_srgb(l: f64, chroma: f64, hue: f64) -> Vec3 {
    let (a, b) = polar_to_cartesian(chroma, hue);
    oklab_to_srgb(l, a, b)
}

fn polar_to_cartesian(chroma: f64, hue_degrees: f64) -> (f64, f64) {
    let chroma = chroma.max(0.0);
    let radians = hue_degrees.to_radians();
    (chroma * radians.cos(), chroma * radians.sin())
}

/// Gamma-encoded sRGB to Oklab
pub(crate) fn srgb_to_oklab(c: Vec3) -> Vec3 {
    let [r, g, b] = c.map(srgb_decode);
    let l = 0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b;
    let m = 0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b;
    let s = 0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b;
    let (l_, m_, s_) = (l.cbrt(), m.cbrt(), s.cbrt());
    [
        0.210_454_255_3 * l_ + 0.793_617_785 * m_ - 0.004_072_046_8 * s_,
        1.977_998_495_1 * l_ - 2.428_592_205 * m_ + 0.450_593_709_9 * s_,
        0.025_904_037_1 * l_ + 0.782_771_766_2 * m_ - 0.808_675_766 * s_,
    ]
}

pub(crate) fn srgb_to_linear(c: Vec3) -> Vec3 {
    c.map(srgb_decode)
}

pub(crate) fn linear_to_srgb(c: Vec3) -> Vec3 {
    linear_srgb_to_srgb(c)
}

/// Predefined spaces accepted by `color()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PredefinedSpace {
    Srgb,
    SrgbLinear,
    DisplayP3,
    A98Rgb,
    ProphotoRgb,
    Rec2020,
    XyzD50,
    XyzD65,
}

impl PredefinedSpace {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "srgb" => Some(Self::Srgb),
            "srgb-linear" => Some(Self::SrgbLinear),
            "display-p3" => Some(Self::DisplayP3),
            "a98-rgb" => Some(Self::A98Rgb),
            "prophoto-rgb" => Some(Self::ProphotoRgb),
            "rec2020" => Some(Self::Rec2020),
            "xyz" | "xyz-d65" => Some(Self::XyzD65),
            "xyz-d50" => Some(Self::XyzD50),
            _ => None,
        }
    }

    pub(crate) fn to_srgb(self, c: Vec3) -> Vec3 {
        match self {
            Self::Srgb => c,
            Self::SrgbLinear => linear_srgb_to_srgb(c),
            Self::DisplayP3 => xyz_d65_to_srgb(mul(&DISPLAY_P3_TO_XYZ_D65, c.map(srgb_decode))),
            Self::A98Rgb => {
                let linear = c.map(|v| v.signum() * v.abs().powf(563.0 / 256.0));
                xyz_d65_to_srgb(mul(&A98_TO_XYZ_D65, linear))
            }
            Self::ProphotoRgb => {
                let linear = c.map(|v| {
                    if v.abs() <= 16.0 / 512.0 {
                        v / 16.0
                    } else {
                        v.signum() * v.abs().powf(1.8)
                    }
                });
                xyz_d50_to_srgb(mul(&PROPHOTO_TO_XYZ_D50, linear))
            }
            Self::Rec2020 => {
                const ALPHA: f64 = 1.099_296_826_809_44;
                const BETA: f64 = 0.018_053_968_510_807;
                let linear = c.map(|v| {
                    let abs = v.abs();
                    if abs < BETA * 4.5 {
                        v / 4.5
                    } else {
                        v.signum() * ((abs + ALPHA - 1.0) / ALPHA).powf(1.0 / 0.45)
                    }
                });
                xyz_d65_to_srgb(mul(&REC2020_TO_XYZ_D65, linear))
            }
            Self::XyzD50 => xyz_d50_to_srgb(c),
            Self::XyzD65 => xyz_d65_to_srgb(c),
        }
    }
}
