// ── Language selection & message catalog ─────────────────────────────────────

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Languages the catalog carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Lang {
    #[default]
    EnUs,
    ZhCn,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported language '{0}' (expected 'en' or 'zh')")]
pub struct ParseLangError(String);

impl FromStr for Lang {
    type Err = ParseLangError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en_us" | "enus" => Ok(Lang::EnUs),
            "zh" | "zh-cn" | "zh_cn" | "zhcn" | "zh-hans" => Ok(Lang::ZhCn),
            _ => Err(ParseLangError(s.to_string())),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::EnUs => write!(f, "en-US"),
            Lang::ZhCn => write!(f, "zh-CN"),
        }
    }
}

impl Lang {
    /// Pick a language from the system locale; English when detection fails
    /// or the locale is unsupported.
    pub fn detect() -> Lang {
        Self::from_locale_tag(sys_locale::get_locale().as_deref())
    }

    fn from_locale_tag(tag: Option<&str>) -> Lang {
        match tag {
            Some(tag) if tag.to_ascii_lowercase().starts_with("zh") => Lang::ZhCn,
            _ => Lang::EnUs,
        }
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

/// (key, English, Simplified Chinese). Keys double as the English source
/// strings, so an untranslated key still renders readably.
const MESSAGES: &[(&str, &str, &str)] = &[
    (
        "Please enter the server address",
        "Please enter the server address",
        "请输入服务器地址",
    ),
    (
        "Please enter the server port",
        "Please enter the server port",
        "请输入服务器端口",
    ),
    (
        "Please enter the server username",
        "Please enter the server username",
        "请输入服务器用户名",
    ),
    (
        "Please enter the server deployment path",
        "Please enter the server deployment path",
        "请输入服务器部署路径",
    ),
    (
        "Please enter the local project path",
        "Please enter the local project path",
        "请输入本地项目路径",
    ),
    (
        "Please enter the ssh key path",
        "Please enter the ssh key path",
        "请输入密钥路径",
    ),
    ("Connection successful", "Connection successful", "连接成功"),
    ("Connection failed", "Connection failed", "连接失败"),
    ("Connection closed", "Connection closed", "连接已关闭"),
    (
        "Create remote directory",
        "Create remote directory",
        "创建远程目录",
    ),
    ("Upload file", "Upload file", "上传文件"),
    ("Upload successful", "Upload successful", "上传成功"),
    ("Upload failed", "Upload failed", "上传失败"),
    (
        "All files uploaded successfully",
        "All files uploaded successfully",
        "所有文件上传成功",
    ),
    ("Deployment successful", "Deployment successful", "部署成功"),
    ("Deployment failed", "Deployment failed", "部署失败"),
];

/// Look `key` up for `lang`. Unknown keys fall back to the key itself, so a
/// missing catalog entry degrades to English rather than breaking output.
pub fn translate<'a>(lang: Lang, key: &'a str) -> &'a str {
    for (k, en, zh) in MESSAGES {
        if *k == key {
            return match lang {
                Lang::EnUs => en,
                Lang::ZhCn => zh,
            };
        }
    }
    key
}
