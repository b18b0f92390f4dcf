// ==========================================
// CNPJ 批量查询 - 校验位算法
// ==========================================
// 职责: 14 位 CNPJ 的结构与校验位校验
// 规则: 加权求和 mod 11，余数 < 2 → '0'，否则 11 - 余数
// ==========================================

/// CNPJ 规范长度
pub const CNPJ_LENGTH: usize = 14;

/// 第一校验位权重（作用于第 0-11 位）
pub const FIRST_DIGIT_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// 第二校验位权重（作用于第 0-12 位，含第一校验位）
pub const SECOND_DIGIT_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// 去除格式符号 `.` `-` `/`
///
/// 校验器本身不做清洗，由调用方先调用本函数。
pub fn strip_punctuation(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '.' | '-' | '/'))
        .collect()
}

/// 计算单个校验位（返回 b'0'..=b'9'）
///
/// 调用方须保证 digits 全部为 ASCII 数字
fn compute_check_digit(digits: &[u8], weights: &[u32]) -> u8 {
    let sum: u32 = digits
        .iter()
        .zip(weights.iter())
        .map(|(d, w)| u32::from(d - b'0') * w)
        .sum();

    let remainder = sum % 11;
    if remainder < 2 {
        b'0'
    } else {
        b'0' + (11 - remainder) as u8
    }
}

/// 校验 CNPJ（输入须已去除格式符号）
///
/// 对任意字符串均有定义：长度不为 14 或含非数字字符 → false。
/// 14 位全相同的数字（如 00000000000000）按无效处理，
/// 其中全零串可以通过加权校验，但不是登记过的号码。
/// 第一校验位不符时直接返回 false，不再计算第二校验位。
pub fn validate(identifier: &str) -> bool {
    let bytes = identifier.as_bytes();
    if bytes.len() != CNPJ_LENGTH || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }
    if bytes.iter().all(|b| *b == bytes[0]) {
        return false;
    }

    let first = compute_check_digit(bytes, &FIRST_DIGIT_WEIGHTS);
    if bytes[12] != first {
        return false;
    }

    let second = compute_check_digit(bytes, &SECOND_DIGIT_WEIGHTS);
    bytes[13] == second
}

/// 为 12 位基数计算两位校验位
///
/// 基数不是 12 位数字时返回 None。
pub fn check_digits_for(base: &str) -> Option<String> {
    let bytes = base.as_bytes();
    if bytes.len() != 12 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }

    let mut digits = bytes.to_vec();
    let first = compute_check_digit(&digits, &FIRST_DIGIT_WEIGHTS);
    digits.push(first);
    let second = compute_check_digit(&digits, &SECOND_DIGIT_WEIGHTS);

    Some(String::from_utf8_lossy(&[first, second]).into_owned())
}
