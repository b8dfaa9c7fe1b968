use phf::phf_map;

/// Reserved list heads handled by dedicated evaluator logic rather than as
/// procedure calls. Every other head is an application.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SpecialForm {
    Quote,
    If,
    Set,
    Define,
    Lambda,
    Begin,
}

pub static SPECIAL_FORMS: phf::Map<&'static str, SpecialForm> = phf_map! {
    "quote" => SpecialForm::Quote,
    "if" => SpecialForm::If,
    "set!" => SpecialForm::Set,
    "define" => SpecialForm::Define,
    "lambda" => SpecialForm::Lambda,
    "λ" => SpecialForm::Lambda,
    "begin" => SpecialForm::Begin,
};
