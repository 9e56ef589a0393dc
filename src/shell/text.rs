//! Fixed text shown by the chat shell.

pub const BANNER: &str = "🧠 Physics Mentor - Your AI Physics Teacher
Specialized in MDCAT, NEET, JEE preparation and intermediate Physics
Type /guide for what I can do, /quit to leave.";

pub const PROMPT: &str = "Ask me any physics question... > ";

pub const THINKING: &str = "🧠 Thinking through the physics...";

pub const STUDY_GUIDE: &str = "📚 Physics Mentor Guide

🎯 What I Can Help With:
- Problem Solving: Step-by-step solutions with clear explanations
- Concept Clarification: Breaking down complex physics topics
- Exam Preparation: MDCAT, NEET, JEE, JEE Advanced
- Formula Sheets: Create organized formula collections
- Study Resources: Find physics videos and materials

📝 Study Tools:
- Save physics notes and solutions to files
- Create exam-specific formula sheets
- Search for educational videos and resources
- Access top physics learning websites

🎓 Exam Focus Areas:
- MDCAT: Medical entrance preparation
- NEET: National medical entrance
- JEE/JEE Advanced: Engineering entrance
- Intermediate: 1st & 2nd year physics

💡 Example Questions:
- \"Solve this kinematics problem step by step\"
- \"Explain Newton's laws with examples\"
- \"Create a formula sheet for NEET\"
- \"Find videos about electromagnetic induction\"
- \"Save these notes about thermodynamics\"

🌐 Physics Resources:
Khan Academy, Physics Classroom, HyperPhysics, Feynman Lectures, Physics Forums, Wolfram Physics";

pub const LEARNING_TIPS: &str = "🧠 Physics Learning Tips:
- Always start with understanding the concept before solving problems
- Practice numerical problems regularly for exam preparation
- Use the formula sheets and save important solutions for revision
- Ask for step-by-step explanations when you're stuck
- Focus on understanding the 'why' behind each formula";

pub const COMMANDS: &str = "Commands: /guide, /tips, /history, /clear, /debug, /quit";
