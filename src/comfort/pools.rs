// Static message tables

use crate::emotion::EmotionCategory;

/// Short affirmations, three per category
pub fn comfort_pool(category: EmotionCategory) -> &'static [&'static str] {
    match category {
        EmotionCategory::Happy => &[
            "你的快乐像阳光一样温暖，继续保持这份美好！",
            "看到你开心，我也感到幸福。愿这份快乐永远伴随着你。",
            "快乐是会传染的，谢谢你分享这份正能量！",
        ],
        EmotionCategory::Sad => &[
            "每个人都会有低落的时候，这很正常。请记住，乌云后面总有阳光。",
            "你的感受很重要，允许自己悲伤也是一种勇气。我在这里陪伴你。",
            "虽然现在很艰难，但请相信，这一切都会过去。你比你想象的更坚强。",
        ],
        EmotionCategory::Angry => &[
            "愤怒是内心在告诉你有些事情需要改变。深呼吸，让我们一起找到解决的方法。",
            "你的愤怒是可以理解的。给自己一点时间，让情绪慢慢平静下来。",
            "愤怒背后往往藏着受伤的心。照顾好自己，你值得被温柔对待。",
        ],
        EmotionCategory::Anxious => &[
            "焦虑是大脑在试图保护你。深呼吸，一切都会好起来的。",
            "现在的担心很真实，但请记住，你已经在尽力了。一步一步来，没关系的。",
            "焦虑像海浪，会来也会走。你不需要独自面对，我在这里支持你。",
        ],
        EmotionCategory::Calm => &[
            "内心的平静是最珍贵的财富。继续保持这份宁静与和谐。",
            "你的平静让人感到安心。这份内在的稳定是你最好的伙伴。",
            "平静不是没有风暴，而是学会在风暴中心找到宁静。你做得很棒！",
        ],
        EmotionCategory::Love => &[
            "爱是这个世界上最美好的力量。愿你的爱被温柔回应。",
            "能够去爱本身就是一种幸福。珍惜这份美好的情感。",
            "爱让世界变得更美好。谢谢你的分享，愿爱永远伴随着你。",
        ],
        EmotionCategory::Confused => &[
            "困惑是成长的开始。每一个疑问都是通向理解的路标。",
            "不知道答案也没关系，探索的过程本身就是一种收获。",
            "迷茫的时候，不妨先停下来听听内心的声音。答案就在你心里。",
        ],
        EmotionCategory::Excited => &[
            "你的兴奋很有感染力！享受这份激动，让热情带你飞向更远的地方。",
            "兴奋是生活在对你微笑。抓住这份能量，创造更多美好！",
            "看到你这么有激情，真为你高兴。愿这份兴奋带来更多惊喜！",
        ],
        EmotionCategory::Tired => &[
            "累了就休息一下吧，照顾好自己是最重要的。你值得被温柔对待。",
            "疲惫是身体在提醒你需要休息。慢一点，给自己一些喘息的空间。",
            "每个人都会有累的时候，这很正常。休息是为了走更远的路。",
        ],
        EmotionCategory::Grateful => &[
            "感恩的心让生活充满阳光。继续保持这份感恩，世界会因你而更美丽。",
            "能够感恩本身就是一种幸福。谢谢你的分享，愿美好永远环绕着你。",
            "感恩是心灵的阳光。你的感激之情让人感受到温暖和希望。",
        ],
    }
}

/// Longer replies, two per category
pub fn reply_pool(category: EmotionCategory) -> &'static [&'static str] {
    match category {
        EmotionCategory::Happy => &[
            "你的快乐很有感染力！继续保持这份美好的心情，让阳光照进生活的每个角落。",
            "看到你开心，我也感到温暖。愿这份快乐成为你内心的力量。",
        ],
        EmotionCategory::Sad => &[
            "我感受到你的悲伤，这种感觉一定很难受。请记住，你不是一个人，我会一直在这里陪伴你。悲伤是暂时的，就像雨后的天空，总会放晴。",
            "每个人都会有低落的时候，这很正常。允许自己感受这些情绪，给自己一些时间和空间。你比你想象的更坚强。",
        ],
        EmotionCategory::Angry => &[
            "我理解你的愤怒，这种感觉一定让你很难受。愤怒背后往往藏着受伤的心，让我们一起找到平静的方法。深呼吸，给自己一些时间。",
            "愤怒是可以理解的，它在告诉你有些事情需要改变。让我们一起找到更好的方式来表达和处理这种情绪。",
        ],
        EmotionCategory::Anxious => &[
            "我感受到你的焦虑，这种感觉一定让你很不安。焦虑是大脑在试图保护你，让我们一起找到让内心平静的方法。深呼吸，一切都会好起来的。",
            "担心和焦虑是可以理解的，它们说明你关心重要的事情。让我们一起一步一步地面对，你不需要独自承担。",
        ],
        EmotionCategory::Calm => &[
            "内心的平静是如此珍贵。继续保持这份宁静，让它成为你面对生活的力量。",
            "平静不是没有风暴，而是学会在风暴中心找到宁静。你做得很好！",
        ],
        EmotionCategory::Love => &[
            "爱是世界上最美好的力量。愿你的爱被温柔回应，也愿你能感受到来自世界的温暖。",
            "能够去爱本身就是一种幸福。珍惜这份美好的情感，让爱成为你内心的光。",
        ],
        EmotionCategory::Confused => &[
            "困惑是成长的开始。每一个疑问都是通向理解的路标，让我们一起慢慢找到答案。",
            "不知道答案也没关系，探索的过程本身就是一种收获。相信自己的内心，答案会渐渐清晰。",
        ],
        EmotionCategory::Excited => &[
            "你的兴奋和热情很有感染力！享受这份激动，让积极的能量带你创造更多美好。",
            "看到你充满激情，真为你高兴。愿这份兴奋成为你追求梦想的动力。",
        ],
        EmotionCategory::Tired => &[
            "我感受到你的疲惫，这种感觉一定让你很难受。累了就休息一下吧，照顾好自己是最重要的。你值得被温柔对待。",
            "疲惫是身体在提醒你需要休息。慢一点，给自己一些喘息的空间。休息是为了走更远的路。",
        ],
        EmotionCategory::Grateful => &[
            "感恩的心让生活充满阳光。继续保持这份感恩，你会发现生活中有更多值得珍惜的美好。",
            "能够感恩本身就是一种幸福。你的感激之情让人感受到温暖，也提醒我们要珍惜身边的一切。",
        ],
    }
}
