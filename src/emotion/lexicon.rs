// Emotion lexicon: trigger substrings per category
//
// Lists are kept exactly as authored, duplicates included. A duplicated
// trigger is scored once per listing.

use super::EmotionCategory;

/// Trigger substrings for a category
pub fn keywords(category: EmotionCategory) -> &'static [&'static str] {
    match category {
        EmotionCategory::Happy => &[
            "开心", "快乐", "高兴", "兴奋", "愉快", "幸福", "满足", "喜悦", "爽", "棒", "好", "爱",
            "喜欢", "美好", "完美", "赞", "太好了", "哈哈", "嘻嘻", "笑",
        ],
        EmotionCategory::Sad => &[
            "难过", "伤心", "悲伤", "痛苦", "哭", "流泪", "失望", "沮丧", "低落", "郁闷", "不开心",
            "难受", "心碎", "痛", "失去", "分离", "孤独", "寂寞",
        ],
        EmotionCategory::Angry => &[
            "生气", "愤怒", "恼火", "烦躁", "讨厌", "恨", "气愤", "暴怒", "不满", "抱怨", "可恶",
            "混蛋", "去死", "烦死了", "气死了",
        ],
        EmotionCategory::Anxious => &[
            "焦虑", "担心", "紧张", "不安", "害怕", "恐惧", "忧虑", "慌张", "忐忑", "心慌", "压力",
            "着急", "急躁", "急躁", "恐慌",
        ],
        EmotionCategory::Calm => &[
            "平静", "安静", "淡定", "放松", "舒适", "安心", "宁静", "祥和", "悠闲", "轻松", "自然",
            "温和", "温柔", "稳定",
        ],
        EmotionCategory::Love => &[
            "爱", "喜欢", "想念", "思念", "恋爱", "心动", "甜蜜", "浪漫", "温馨", "幸福", "拥抱",
            "亲吻", "爱人", "恋人", "心上人",
        ],
        EmotionCategory::Confused => &[
            "困惑", "迷茫", "疑惑", "不解", "糊涂", "混乱", "复杂", "纠结", "犹豫", "不确定",
            "不知道", "搞不懂", "不明白",
        ],
        EmotionCategory::Excited => &[
            "激动", "兴奋", "振奋", "热情", "激情", "热烈", "狂热", "高涨", "澎湃", "沸腾", "雀跃",
            "欢呼", "喝彩",
        ],
        EmotionCategory::Tired => &[
            "累", "疲惫", "疲倦", "困", "乏力", "无力", "精疲力尽", "疲惫不堪", "困倦", "瞌睡",
            "没精神", "没力气",
        ],
        EmotionCategory::Grateful => &[
            "感谢", "感恩", "感激", "谢谢", "多谢", "恩情", "恩情", "恩德", "铭记", "难忘", "感动",
            "感慨",
        ],
    }
}
