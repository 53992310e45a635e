//! Built-in demo corpora, one per store.

use serde::Serialize;

use crate::fetch::types::Platform;

pub const PLAY_STORE_SAMPLES: &[&str] = &[
    "This app crashes every time I try to open my profile. Very frustrating experience!",
    "Amazing app! Love the clean interface and smooth performance. Highly recommend it.",
    "Too many ads! Every 30 seconds there's a popup. It's basically unusable now.",
    "The latest update completely ruined the app. It was fine before, now it keeps freezing.",
    "Great customer support team. They resolved my issue within hours. Thank you!",
    "Battery drain is insane. This app eats up 40% of my battery in an hour.",
    "Privacy concerns - this app seems to track everything and asks for unnecessary permissions.",
    "The app is okay but really needs a dark mode. Also the font size is too small.",
    "I can't even log in anymore. Password reset doesn't work. Terrible experience.",
    "Best app in its category! Fast, reliable, and the features are incredible.",
    "Notifications are out of control. I get 20+ notifications a day even after turning them off.",
    "Very slow loading times. Sometimes takes 30 seconds just to open the main page.",
    "Love this app! It has everything I need. The new update made it even better.",
    "Constant disconnections. The app loses connection every few minutes. Fix your servers!",
    "The UI is very confusing. Took me forever to find basic settings. Needs a redesign.",
    "Scam alert! They charged me twice for the subscription and support won't respond.",
    "Decent app but missing some important features that competitors already have.",
    "After the update, my saved data was completely deleted. Absolutely unacceptable!",
    "Smooth, intuitive, and beautifully designed. One of the best apps I've ever used.",
    "The app works fine on WiFi but is completely broken on mobile data. Very annoying.",
    "Keeps crashing on my phone after the last update. Please fix this ASAP!",
    "I've been using this for 2 years and it just keeps getting better. 5 stars!",
    "Horrible customer service. Been waiting 3 weeks for a response to my ticket.",
    "The app is bloated with unnecessary features. It used to be simple and clean.",
    "Can't believe they removed the free version. Now everything requires a subscription.",
];

pub const APP_STORE_SAMPLES: &[&str] = &[
    "App freezes constantly since iOS 17 update. Developers need to fix compatibility issues ASAP.",
    "Absolutely love this app! It's elegant, fast, and completely worth the price.",
    "Drains my iPhone battery like crazy. Had to uninstall after a day of use.",
    "The subscription model is ridiculous. $14.99/month for basic features? No thanks.",
    "Wonderful experience overall. Clean design and intuitive navigation. 5 stars!",
    "App crashes when I try to upload photos. This bug has been there for months!",
    "Push notifications don't work half the time. Missed important alerts because of this.",
    "Security concern: the app asks for camera and microphone access even when not needed.",
    "After the latest update, all my settings were reset. Very frustrating!",
    "Best app for productivity! Syncs perfectly across all my Apple devices.",
    "Login issues every single day. Have to reset my password constantly.",
    "The dark mode looks gorgeous! Finally an app that does dark mode right.",
    "Way too many in-app purchases. The free version is basically a demo.",
    "Extremely slow on my iPad Air. Takes forever to load content.",
    "Customer support actually responded and fixed my issue same day. Rare these days!",
    "The app keeps sending me spam notifications. There's no way to fully disable them.",
    "Beautifully designed but lacks basic features. Form over function.",
    "Network errors every time I'm on cellular data. Only works on WiFi.",
    "This used to be my favorite app but the new update made it worse. Bringing back old bugs.",
    "Simple, effective, and doesn't try to do too much. Perfect utility app.",
];

pub fn for_platform(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::PlayStore => PLAY_STORE_SAMPLES,
        Platform::AppStore => APP_STORE_SAMPLES,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SampleSet {
    pub platform: Platform,
    pub reviews: &'static [&'static str],
}

impl SampleSet {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            reviews: for_platform(platform),
        }
    }
}
